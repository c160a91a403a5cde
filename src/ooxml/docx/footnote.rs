/// Footnote handles.
///
/// A footnote's content paragraph opens with a run holding the
/// `w:footnoteRef` mark; the note's text follows in later runs.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::{FootnoteElement, NoteType, Tag};

/// A footnote in a Word document.
///
/// Represents a `<w:footnote>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footnote {
    element: FootnoteElement,
}

impl Footnote {
    #[inline]
    pub(crate) fn from_element(element: FootnoteElement) -> Self {
        Self { element }
    }

    /// The underlying `w:footnote` element.
    #[inline]
    pub fn element(&self) -> FootnoteElement {
        self.element
    }

    pub fn id(&self, doc: &Document) -> Result<i32> {
        self.element.id(doc.tree())
    }

    pub fn note_type(&self, doc: &Document) -> Result<NoteType> {
        self.element.note_type(doc.tree())
    }

    /// The content paragraph, if present.
    pub fn paragraph(&self, doc: &Document) -> Option<Paragraph> {
        self.element.paragraph(doc.tree()).map(Paragraph::from_node)
    }

    /// Text of the content paragraph; the reference mark contributes nothing.
    pub fn text(&self, doc: &Document) -> Result<String> {
        match self.paragraph(doc) {
            Some(paragraph) => paragraph.text(doc),
            None => Ok(String::new()),
        }
    }

    /// Replace the note's text, keeping the reference mark run.
    pub fn set_text(&self, doc: &mut Document, text: &str) -> Result<()> {
        let p = self.element.get_or_add_paragraph(doc.tree_mut())?;
        let keep = self.element.reference_run(doc.tree());
        let doomed: Vec<_> = doc
            .tree()
            .children_tagged(p, Tag::R)
            .filter(|r| Some(*r) != keep)
            .collect();
        for r in doomed {
            doc.tree_mut().remove(r);
        }
        if !text.is_empty() {
            Paragraph::from_node(p).add_run(doc, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::RunContent;

    #[test]
    fn test_set_text_keeps_reference_mark() {
        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("body").unwrap();
        let footnote = para.add_footnote(&mut doc, "first").unwrap();
        footnote.set_text(&mut doc, "second").unwrap();

        let runs = footnote.paragraph(&doc).unwrap().runs(&doc);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].content(&doc).unwrap(), vec![RunContent::FootnoteRef]);
        assert_eq!(footnote.text(&doc).unwrap(), "second");
        assert_eq!(footnote.note_type(&doc).unwrap(), NoteType::Normal);
    }

    #[test]
    fn test_footnotes_skip_placeholders() {
        let mut doc = Document::new().unwrap();
        let para = doc.add_paragraph("body").unwrap();
        para.add_footnote(&mut doc, "a").unwrap();
        para.add_footnote(&mut doc, "b").unwrap();
        let ids: Vec<i32> = doc
            .footnotes()
            .unwrap()
            .iter()
            .map(|f| f.id(&doc).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_custom_styles_from_options() {
        use crate::ooxml::docx::DocxOptions;

        let options = DocxOptions::new()
            .with_footnote_reference_style("NoteMark")
            .with_footnote_text_style("NoteBody");
        let mut doc = Document::with_options(options).unwrap();
        let para = doc.add_paragraph("body").unwrap();
        let footnote = para.add_footnote(&mut doc, "n").unwrap();

        let content = footnote.paragraph(&doc).unwrap();
        assert_eq!(content.style(&doc).unwrap().as_deref(), Some("NoteBody"));
        assert_eq!(content.runs(&doc)[0].style(&doc).unwrap().as_deref(), Some("NoteMark"));
        let reference = para.runs(&doc)[1];
        assert_eq!(reference.style(&doc).unwrap().as_deref(), Some("NoteMark"));
    }
}
