/// The set of parts making up one Word document.
///
/// Parts enter as raw XML bytes and are parsed into the document's shared
/// arena; the annotation parts are created from skeletons the first time an
/// annotation is added.
use crate::ooxml::docx::template;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::packuri::{COMMENTS_URI, DOCUMENT_URI, FOOTNOTES_URI};
use crate::ooxml::opc::{PackURI, Part, XmlPart};
use crate::ooxml::oxml::{NodeId, Tag, XmlTree};
use tracing::debug;

/// The parts this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Document,
    Comments,
    Footnotes,
}

impl PartKind {
    pub fn partname(self) -> &'static str {
        match self {
            PartKind::Document => DOCUMENT_URI,
            PartKind::Comments => COMMENTS_URI,
            PartKind::Footnotes => FOOTNOTES_URI,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            PartKind::Document => ct::WML_DOCUMENT_MAIN,
            PartKind::Comments => ct::WML_COMMENTS,
            PartKind::Footnotes => ct::WML_FOOTNOTES,
        }
    }

    /// Relationship type from the package (document) or from the main
    /// document part (annotation parts) to this part.
    pub fn reltype(self) -> &'static str {
        match self {
            PartKind::Document => rt::OFFICE_DOCUMENT,
            PartKind::Comments => rt::COMMENTS,
            PartKind::Footnotes => rt::FOOTNOTES,
        }
    }

    fn root_tag(self) -> Tag {
        match self {
            PartKind::Document => Tag::Document,
            PartKind::Comments => Tag::Comments,
            PartKind::Footnotes => Tag::Footnotes,
        }
    }

    fn skeleton(self) -> &'static str {
        match self {
            PartKind::Document => template::DOCUMENT_XML,
            PartKind::Comments => template::COMMENTS_XML,
            PartKind::Footnotes => template::FOOTNOTES_XML,
        }
    }

    /// Kind of the part stored at `partname`, if modeled.
    pub fn from_partname(partname: &str) -> Option<Self> {
        match partname {
            DOCUMENT_URI => Some(PartKind::Document),
            COMMENTS_URI => Some(PartKind::Comments),
            FOOTNOTES_URI => Some(PartKind::Footnotes),
            _ => None,
        }
    }
}

/// Access to the annotation store roots of a document.
///
/// The `get_or_create_*` methods add the part from its skeleton when the
/// document has none yet; the plain accessors never create anything.
pub trait PartRegistry {
    fn comments_root(&self) -> Option<NodeId>;

    fn footnotes_root(&self) -> Option<NodeId>;

    fn get_or_create_comments_root(&mut self, tree: &mut XmlTree) -> Result<NodeId>;

    fn get_or_create_footnotes_root(&mut self, tree: &mut XmlTree) -> Result<NodeId>;
}

/// Serialized form of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartBlob {
    pub partname: PackURI,
    pub content_type: String,
    pub reltype: &'static str,
    pub xml: Vec<u8>,
}

/// A Word document's modeled parts.
#[derive(Debug, Clone)]
pub struct Package {
    document: XmlPart,
    comments: Option<XmlPart>,
    footnotes: Option<XmlPart>,
}

impl Package {
    /// Start a package from the main document part's XML.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidFormat`] if the markup's root is not `w:document`.
    pub fn load(tree: &mut XmlTree, document_xml: &[u8]) -> Result<Self> {
        let document = load_kind(tree, PartKind::Document, document_xml)?;
        Ok(Self {
            document,
            comments: None,
            footnotes: None,
        })
    }

    /// A package holding an empty document.
    pub fn new(tree: &mut XmlTree) -> Result<Self> {
        Self::load(tree, PartKind::Document.skeleton().as_bytes())
    }

    /// Add or replace a part by partname.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidPartname`] for a partname this crate does not
    /// model; [`OoxmlError::InvalidFormat`] for a root of the wrong kind.
    pub fn add_part(&mut self, tree: &mut XmlTree, partname: &str, xml: &[u8]) -> Result<()> {
        let kind = PartKind::from_partname(partname).ok_or_else(|| {
            OoxmlError::InvalidPartname(format!("{} is not a modeled part", partname))
        })?;
        let part = load_kind(tree, kind, xml)?;
        match kind {
            PartKind::Document => self.document = part,
            PartKind::Comments => self.comments = Some(part),
            PartKind::Footnotes => self.footnotes = Some(part),
        }
        Ok(())
    }

    /// Root of the main document part (`w:document`).
    #[inline]
    pub fn document_root(&self) -> NodeId {
        self.document.root()
    }

    pub fn part(&self, kind: PartKind) -> Option<&XmlPart> {
        match kind {
            PartKind::Document => Some(&self.document),
            PartKind::Comments => self.comments.as_ref(),
            PartKind::Footnotes => self.footnotes.as_ref(),
        }
    }

    /// Serialize every present part, main document first.
    pub fn to_blobs(&self, tree: &XmlTree) -> Result<Vec<PartBlob>> {
        let mut blobs = Vec::with_capacity(3);
        for kind in [PartKind::Document, PartKind::Comments, PartKind::Footnotes] {
            if let Some(part) = self.part(kind) {
                blobs.push(PartBlob {
                    partname: part.partname().clone(),
                    content_type: part.content_type().to_string(),
                    reltype: kind.reltype(),
                    xml: part.blob(tree)?,
                });
            }
        }
        Ok(blobs)
    }

    fn get_or_create(&mut self, tree: &mut XmlTree, kind: PartKind) -> Result<NodeId> {
        let slot = match kind {
            PartKind::Comments => &mut self.comments,
            PartKind::Footnotes => &mut self.footnotes,
            PartKind::Document => return Ok(self.document.root()),
        };
        if let Some(part) = slot.as_ref() {
            return Ok(part.root());
        }
        let part = load_kind(tree, kind, kind.skeleton().as_bytes())?;
        debug!(partname = kind.partname(), "annotation part created");
        let root = part.root();
        *slot = Some(part);
        Ok(root)
    }
}

impl PartRegistry for Package {
    fn comments_root(&self) -> Option<NodeId> {
        self.comments.as_ref().map(XmlPart::root)
    }

    fn footnotes_root(&self) -> Option<NodeId> {
        self.footnotes.as_ref().map(XmlPart::root)
    }

    fn get_or_create_comments_root(&mut self, tree: &mut XmlTree) -> Result<NodeId> {
        self.get_or_create(tree, PartKind::Comments)
    }

    fn get_or_create_footnotes_root(&mut self, tree: &mut XmlTree) -> Result<NodeId> {
        self.get_or_create(tree, PartKind::Footnotes)
    }
}

fn load_kind(tree: &mut XmlTree, kind: PartKind, xml: &[u8]) -> Result<XmlPart> {
    let partname = PackURI::new(kind.partname())?;
    let part = XmlPart::load(tree, partname, kind.content_type(), xml)?;
    if tree.tag(part.root()) != Some(kind.root_tag()) {
        return Err(OoxmlError::InvalidFormat(format!(
            "{} has root <{}>",
            kind.partname(),
            tree.display_name(part.root())
        )));
    }
    Ok(part)
}
