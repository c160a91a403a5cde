/// Configuration for annotation editing.
///
/// The defaults reproduce what Word itself writes for new comments and
/// footnotes; hosts override them per document.
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ooxml::oxml::{FOOTNOTE_REFERENCE_STYLE, FOOTNOTE_TEXT_STYLE};

/// Where comment timestamps come from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// Current UTC time at the moment the comment is added.
    #[default]
    Now,
    /// A fixed `w:date` value, e.g. for reproducible output.
    Fixed(String),
}

/// Options used by [`Document`](super::Document) when it creates comments
/// and footnotes.
///
/// # Examples
///
/// ```rust
/// use marginalia::ooxml::docx::{DateSource, DocxOptions};
///
/// let options = DocxOptions::new()
///     .with_author("Alice")
///     .with_initials("AL")
///     .with_date_source(DateSource::Fixed("2024-01-01T00:00:00Z".to_string()));
/// assert_eq!(options.timestamp(), "2024-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxOptions {
    /// Author written on comments that do not name one
    pub author: String,
    /// Initials written on comments that do not name them
    pub initials: String,
    /// Character style applied to footnote reference runs
    pub footnote_reference_style: String,
    /// Paragraph style applied to footnote content
    pub footnote_text_style: String,
    /// Source of comment timestamps
    pub date_source: DateSource,
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            author: "marginalia".to_string(),
            initials: "mg".to_string(),
            footnote_reference_style: FOOTNOTE_REFERENCE_STYLE.to_string(),
            footnote_text_style: FOOTNOTE_TEXT_STYLE.to_string(),
            date_source: DateSource::Now,
        }
    }
}

impl DocxOptions {
    /// Create a new `DocxOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[inline]
    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = initials.into();
        self
    }

    /// Set the character style of footnote reference runs.
    ///
    /// Applies both to the body run that references a footnote and to the
    /// `w:footnoteRef` run that opens the footnote's own paragraph.
    #[inline]
    pub fn with_footnote_reference_style(mut self, style: impl Into<String>) -> Self {
        self.footnote_reference_style = style.into();
        self
    }

    #[inline]
    pub fn with_footnote_text_style(mut self, style: impl Into<String>) -> Self {
        self.footnote_text_style = style.into();
        self
    }

    #[inline]
    pub fn with_date_source(mut self, source: DateSource) -> Self {
        self.date_source = source;
        self
    }

    /// Timestamp for a comment created now, in `w:date` form.
    pub fn timestamp(&self) -> String {
        match &self.date_source {
            DateSource::Now => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            DateSource::Fixed(date) => date.clone(),
        }
    }
}
