/// Comment handles.
///
/// A comment carries author, initials and date metadata and one content
/// paragraph. Body runs point at it through `w:commentReference` markers.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::CommentElement;

/// A comment in a Word document.
///
/// Represents a `<w:comment>` element.
///
/// # Examples
///
/// ```rust
/// use marginalia::ooxml::docx::Document;
///
/// let mut doc = Document::new()?;
/// let para = doc.add_paragraph("Hello")?;
/// para.add_comment(&mut doc, "Reword this", Some("Alice"), Some("AL"), None)?;
///
/// for comment in doc.comments()? {
///     println!("Comment by {}: {}", comment.author(&doc)?, comment.text(&doc)?);
/// }
/// # Ok::<(), marginalia::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comment {
    element: CommentElement,
}

impl Comment {
    #[inline]
    pub(crate) fn from_element(element: CommentElement) -> Self {
        Self { element }
    }

    /// The underlying `w:comment` element.
    #[inline]
    pub fn element(&self) -> CommentElement {
        self.element
    }

    pub fn id(&self, doc: &Document) -> Result<i32> {
        self.element.id(doc.tree())
    }

    pub fn author(&self, doc: &Document) -> Result<String> {
        self.element.author(doc.tree())
    }

    pub fn set_author(&self, doc: &mut Document, author: &str) -> Result<()> {
        self.element.set_author(doc.tree_mut(), author)
    }

    pub fn initials(&self, doc: &Document) -> Result<String> {
        self.element.initials(doc.tree())
    }

    pub fn set_initials(&self, doc: &mut Document, initials: &str) -> Result<()> {
        self.element.set_initials(doc.tree_mut(), initials)
    }

    /// The `w:date` value as written.
    pub fn date(&self, doc: &Document) -> Result<String> {
        self.element.date(doc.tree())
    }

    pub fn set_date(&self, doc: &mut Document, date: &str) -> Result<()> {
        self.element.set_date(doc.tree_mut(), date)
    }

    /// The content paragraph, if present.
    pub fn paragraph(&self, doc: &Document) -> Option<Paragraph> {
        self.element.paragraph(doc.tree()).map(Paragraph::from_node)
    }

    /// Text of the content paragraph; empty when there is none.
    pub fn text(&self, doc: &Document) -> Result<String> {
        match self.paragraph(doc) {
            Some(paragraph) => paragraph.text(doc),
            None => Ok(String::new()),
        }
    }

    /// Replace the content paragraph's text.
    pub fn set_text(&self, doc: &mut Document, text: &str) -> Result<()> {
        let p = self.element.get_or_add_paragraph(doc.tree_mut())?;
        Paragraph::from_node(p).set_text(doc, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_round_trip() {
        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("x").unwrap();
        let comment = para
            .add_comment(&mut doc, "first", Some("Alice"), Some("A"), Some("2024-02-03T04:05:06Z"))
            .unwrap();
        assert_eq!(comment.initials(&doc).unwrap(), "A");
        assert_eq!(comment.date(&doc).unwrap(), "2024-02-03T04:05:06Z");

        comment.set_author(&mut doc, "Bob").unwrap();
        comment.set_initials(&mut doc, "B").unwrap();
        comment.set_date(&mut doc, "2025-01-01T00:00:00Z").unwrap();
        assert_eq!(comment.author(&doc).unwrap(), "Bob");
        assert_eq!(comment.initials(&doc).unwrap(), "B");
        assert_eq!(comment.date(&doc).unwrap(), "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("x").unwrap();
        let comment = para.add_comment(&mut doc, "first", None, None, None).unwrap();
        comment.set_text(&mut doc, "line one\nline two").unwrap();
        assert_eq!(comment.text(&doc).unwrap(), "line one\nline two");
        assert_eq!(comment.paragraph(&doc).unwrap().runs(&doc).len(), 1);
    }

    #[test]
    fn test_handles_dedupe_by_entry() {
        use std::collections::HashSet;

        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("x").unwrap();
        let run = para.runs(&doc)[0];
        run.add_comment(&mut doc, "a", None, None, None).unwrap();
        run.add_comment(&mut doc, "b", None, None, None).unwrap();
        let mut seen: HashSet<Comment> = run.comments(&doc).unwrap().into_iter().collect();
        seen.extend(doc.comments().unwrap());
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_store_order_listing() {
        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("x").unwrap();
        for text in ["a", "b", "c"] {
            para.add_comment(&mut doc, text, None, None, None).unwrap();
        }
        let texts: Vec<String> = doc
            .comments()
            .unwrap()
            .iter()
            .map(|c| c.text(&doc).unwrap())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
