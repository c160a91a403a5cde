/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// An element or attribute does not satisfy the declared schema.
    ///
    /// Raised when a required attribute is missing, a value fails its type
    /// codec, or a child tag is not permitted under its parent.
    #[error("Schema violation on <{element}>: {reason}")]
    SchemaViolation { element: String, reason: String },

    /// Annotation id allocation failed
    #[error("Id allocation failed: {0}")]
    Allocation(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid partname
    #[error("Invalid partname: {0}")]
    InvalidPartname(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl OoxmlError {
    /// Build a [`OoxmlError::SchemaViolation`] for `element`.
    pub(crate) fn schema(element: impl Into<String>, reason: impl Into<String>) -> Self {
        OoxmlError::SchemaViolation {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for OoxmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        OoxmlError::Xml(format!("Invalid UTF-8 in XML: {}", err))
    }
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Other(err.to_string())
    }
}
