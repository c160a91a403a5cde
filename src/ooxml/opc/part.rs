/// Package parts backed by the shared markup arena.
///
/// An [`XmlPart`] does not own its markup: its root lives in an
/// [`XmlTree`] shared with the other parts of the same document, so a body
/// run and the comment it references can be edited in one pass.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::oxml::{NodeId, XmlTree};
use tracing::debug;

/// A part in a package: a partname and a content type.
pub trait Part {
    /// Get the partname of this part.
    fn partname(&self) -> &PackURI;

    /// Get the content type of this part.
    fn content_type(&self) -> &str;
}

/// An XML part whose markup is parsed into an arena.
#[derive(Debug, Clone)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    root: NodeId,
}

impl XmlPart {
    /// Wrap an already-built root element.
    pub fn new(partname: PackURI, content_type: impl Into<String>, root: NodeId) -> Self {
        Self {
            partname,
            content_type: content_type.into(),
            root,
        }
    }

    /// Parse `xml_bytes` into `tree` and wrap the resulting root.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidFormat`] if the content type is not an XML type,
    /// or any parse error from [`XmlTree::parse`].
    pub fn load(
        tree: &mut XmlTree,
        partname: PackURI,
        content_type: impl Into<String>,
        xml_bytes: &[u8],
    ) -> Result<Self> {
        let content_type = content_type.into();
        if !is_xml_content_type(&content_type) {
            return Err(OoxmlError::InvalidFormat(format!(
                "{} has non-XML content type '{}'",
                partname, content_type
            )));
        }
        let root = tree.parse(xml_bytes)?;
        debug!(partname = %partname, nodes = tree.len(), "part loaded");
        Ok(Self::new(partname, content_type, root))
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Serialize this part's markup, XML declaration included.
    pub fn blob(&self, tree: &XmlTree) -> Result<Vec<u8>> {
        Ok(tree.to_xml(self.root)?.into_bytes())
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Whether a content type denotes XML content.
#[inline]
pub fn is_xml_content_type(content_type: &str) -> bool {
    content_type.ends_with("+xml") || content_type.ends_with("/xml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::packuri::COMMENTS_URI;
    use crate::ooxml::oxml::Tag;

    #[test]
    fn test_load_and_serialize() {
        let mut tree = XmlTree::new();
        let partname = PackURI::new(COMMENTS_URI).unwrap();
        let part = XmlPart::load(&mut tree, partname, ct::WML_COMMENTS, b"<w:comments/>").unwrap();
        assert_eq!(part.content_type(), ct::WML_COMMENTS);
        assert_eq!(part.partname().as_str(), COMMENTS_URI);
        assert_eq!(tree.tag(part.root()), Some(Tag::Comments));
        let blob = String::from_utf8(part.blob(&tree).unwrap()).unwrap();
        assert!(blob.ends_with("<w:comments/>"));
        assert!(blob.starts_with("<?xml"));
    }

    #[test]
    fn test_non_xml_content_type_is_rejected() {
        let mut tree = XmlTree::new();
        let partname = PackURI::new("/word/media/image1.png").unwrap();
        assert!(matches!(
            XmlPart::load(&mut tree, partname, "image/png", b"\x89PNG"),
            Err(OoxmlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_is_xml_content_type() {
        assert!(is_xml_content_type("application/xml"));
        assert!(is_xml_content_type(ct::WML_DOCUMENT_MAIN));
        assert!(!is_xml_content_type("image/png"));
    }
}
