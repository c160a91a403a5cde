/// Part names within a WordprocessingML package.
///
/// A partname always begins with a forward slash and uses forward slashes
/// as path separators, e.g. `/word/comments.xml`.
use crate::ooxml::error::{OoxmlError, Result};

/// Partname of the main document part.
pub const DOCUMENT_URI: &str = "/word/document.xml";

/// Partname of the comments part.
pub const COMMENTS_URI: &str = "/word/comments.xml";

/// Partname of the footnotes part.
pub const FOOTNOTES_URI: &str = "/word/footnotes.xml";

/// A validated partname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a partname.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidPartname`] if `uri` does not begin with a slash
    /// or names the package root itself.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OoxmlError::InvalidPartname(format!(
                "partname must begin with slash, got '{}'",
                uri
            )));
        }
        if uri.len() == 1 {
            return Err(OoxmlError::InvalidPartname(
                "the package root is not a part".to_string(),
            ));
        }
        Ok(PackURI { uri })
    }

    /// Directory portion, e.g. `/word` for `/word/comments.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Filename portion, e.g. `comments.xml`.
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map(|pos| &self.uri[pos + 1..])
            .unwrap_or("")
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        filename
            .rfind('.')
            .map(|pos| &filename[pos + 1..])
            .unwrap_or("")
    }

    /// The partname with its leading slash stripped, as used for Zip members.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new(COMMENTS_URI).is_ok());
        assert!(matches!(
            PackURI::new("word/comments.xml"),
            Err(OoxmlError::InvalidPartname(_))
        ));
        assert!(PackURI::new("/").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new(FOOTNOTES_URI).unwrap();
        assert_eq!(uri.base_uri(), "/word");
        assert_eq!(uri.filename(), "footnotes.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.membername(), "word/footnotes.xml");
        assert_eq!(uri.to_string(), FOOTNOTES_URI);
    }

    #[test]
    fn test_top_level_part() {
        let uri = PackURI::new("/[Content_Types].xml").unwrap();
        assert_eq!(uri.base_uri(), "/");
        assert_eq!(uri.filename(), "[Content_Types].xml");
    }
}
