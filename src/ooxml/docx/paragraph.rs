/// Paragraph and Run handles for Word documents.
use crate::ooxml::docx::comment::Comment;
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::footnote::Footnote;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::text::{
    append_run_content, clear_run_content, encode, read_run_content, run_text, set_run_text,
};
use crate::ooxml::oxml::{
    BreakType, NodeId, ReferenceKind, RunContent, Tag, XmlTree, link_comment,
    link_footnote_reference, read_reference_ids,
};
use smallvec::SmallVec;
use tracing::trace;

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element, whether in the body or inside a comment or
/// footnote. Paragraphs contain runs which in turn contain the actual text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paragraph {
    p: NodeId,
}

impl Paragraph {
    #[inline]
    pub(crate) fn from_node(p: NodeId) -> Self {
        Self { p }
    }

    /// The underlying `w:p` node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.p
    }

    /// Runs directly under this paragraph, in document order.
    pub fn runs(&self, doc: &Document) -> SmallVec<[Run; 8]> {
        doc.tree()
            .children_tagged(self.p, Tag::R)
            .map(Run::from_node)
            .collect()
    }

    /// Concatenated text of all runs.
    pub fn text(&self, doc: &Document) -> Result<String> {
        let mut text = String::new();
        for run in self.runs(doc) {
            text.push_str(&run.text(doc)?);
        }
        Ok(text)
    }

    /// Replace the content with a single run holding `text`.
    ///
    /// Paragraph properties are kept; an empty `text` leaves no runs.
    pub fn set_text(&self, doc: &mut Document, text: &str) -> Result<()> {
        self.clear(doc);
        if !text.is_empty() {
            self.add_run(doc, text)?;
        }
        Ok(())
    }

    /// Remove all content except the paragraph properties.
    pub fn clear(&self, doc: &mut Document) {
        doc.tree_mut().clear_children_except(self.p, &[Tag::PPr]);
    }

    /// Append a run holding `text`.
    pub fn add_run(&self, doc: &mut Document, text: &str) -> Result<Run> {
        let r = doc.tree_mut().add_child(self.p, Tag::R)?;
        let run = Run::from_node(r);
        if !text.is_empty() {
            run.set_text(doc, text)?;
        }
        Ok(run)
    }

    /// Paragraph style id (`w:pStyle`).
    pub fn style(&self, doc: &Document) -> Result<Option<String>> {
        style_of(doc.tree(), self.p, Tag::PPr, Tag::PStyle)
    }

    /// Set or, with `None`, remove the paragraph style.
    pub fn set_style(&self, doc: &mut Document, style: Option<&str>) -> Result<()> {
        set_style_of(doc.tree_mut(), self.p, Tag::PPr, Tag::PStyle, style)
    }

    /// Comment a fresh run appended to this paragraph.
    ///
    /// See [`Run::add_comment`] for how missing metadata is filled in.
    pub fn add_comment(
        &self,
        doc: &mut Document,
        text: &str,
        author: Option<&str>,
        initials: Option<&str>,
        date: Option<&str>,
    ) -> Result<Comment> {
        let run = self.add_run(doc, "")?;
        run.add_comment(doc, text, author, initials, date)
    }

    /// Add a footnote holding `text` and reference it from a new run at the
    /// end of this paragraph.
    ///
    /// The footnotes part is created when the document has none.
    pub fn add_footnote(&self, doc: &mut Document, text: &str) -> Result<Footnote> {
        let reference_style = doc.options().footnote_reference_style.clone();
        let text_style = doc.options().footnote_text_style.clone();

        let store = doc.get_or_create_footnote_store()?;
        let entry = store.add(doc.tree_mut(), &reference_style, &text_style)?;
        let id = entry.id(doc.tree())?;
        let footnote = Footnote::from_element(entry);
        footnote.set_text(doc, text)?;

        let run = self.add_run(doc, "")?;
        link_footnote_reference(doc.tree_mut(), run.node(), id, &reference_style)?;
        trace!(id, "footnote referenced");
        Ok(footnote)
    }

    /// Comments referenced from this paragraph's runs, in run order.
    ///
    /// References with no matching comment are skipped, and a comment
    /// referenced twice appears twice.
    pub fn comments(&self, doc: &Document) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        for run in self.runs(doc) {
            comments.extend(run.comments(doc)?);
        }
        Ok(comments)
    }

    /// Ids of the comment references in this paragraph's runs, unresolved.
    pub fn comment_ids(&self, doc: &Document) -> Result<Vec<i32>> {
        self.reference_ids(doc, ReferenceKind::Comment)
    }

    /// Footnotes referenced from this paragraph's runs, in run order.
    ///
    /// References with no matching footnote are skipped.
    pub fn footnotes(&self, doc: &Document) -> Result<Vec<Footnote>> {
        let Some(store) = doc.footnote_store()? else {
            return Ok(Vec::new());
        };
        let mut footnotes = Vec::new();
        for id in self.footnote_ids(doc)? {
            if let Some(entry) = store.get_by_id(doc.tree(), id)? {
                footnotes.push(Footnote::from_element(entry));
            }
        }
        Ok(footnotes)
    }

    /// Ids of the footnote references in this paragraph's runs, unresolved.
    pub fn footnote_ids(&self, doc: &Document) -> Result<Vec<i32>> {
        self.reference_ids(doc, ReferenceKind::Footnote)
    }

    fn reference_ids(&self, doc: &Document, kind: ReferenceKind) -> Result<Vec<i32>> {
        let mut ids = Vec::new();
        for run in self.runs(doc) {
            ids.extend(read_reference_ids(doc.tree(), run.node(), kind)?);
        }
        Ok(ids)
    }
}

/// A run of content with uniform character formatting.
///
/// Represents a `<w:r>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    r: NodeId,
}

impl Run {
    #[inline]
    pub(crate) fn from_node(r: NodeId) -> Self {
        Self { r }
    }

    /// The underlying `w:r` node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.r
    }

    /// Plain text of the run: tabs as `\t`, line breaks as `\n`.
    pub fn text(&self, doc: &Document) -> Result<String> {
        run_text(doc.tree(), self.r)
    }

    /// Replace the run's content with `text`, keeping its formatting.
    ///
    /// Reference markers in the run are removed along with everything else.
    pub fn set_text(&self, doc: &mut Document, text: &str) -> Result<()> {
        set_run_text(doc.tree_mut(), self.r, text)
    }

    /// Append `text` after the existing content.
    pub fn add_text(&self, doc: &mut Document, text: &str) -> Result<()> {
        append_run_content(doc.tree_mut(), self.r, &encode(text))?;
        Ok(())
    }

    pub fn add_tab(&self, doc: &mut Document) -> Result<()> {
        append_run_content(doc.tree_mut(), self.r, &[RunContent::Tab])?;
        Ok(())
    }

    pub fn add_break(&self, doc: &mut Document, kind: BreakType) -> Result<()> {
        append_run_content(doc.tree_mut(), self.r, &[RunContent::Break(kind)])?;
        Ok(())
    }

    /// Inner content items in document order.
    pub fn content(&self, doc: &Document) -> Result<Vec<RunContent>> {
        read_run_content(doc.tree(), self.r)
    }

    /// Remove all content, keeping the run properties.
    pub fn clear(&self, doc: &mut Document) {
        clear_run_content(doc.tree_mut(), self.r);
    }

    /// Character style id (`w:rStyle`).
    pub fn style(&self, doc: &Document) -> Result<Option<String>> {
        style_of(doc.tree(), self.r, Tag::RPr, Tag::RStyle)
    }

    /// Set or, with `None`, remove the character style.
    pub fn set_style(&self, doc: &mut Document, style: Option<&str>) -> Result<()> {
        set_style_of(doc.tree_mut(), self.r, Tag::RPr, Tag::RStyle, style)
    }

    /// Add a comment holding `text` and anchor it on this run.
    ///
    /// Missing `author` and `initials` come from the document options, and a
    /// missing `date` from its date source. The comments part is created when
    /// the document has none.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`](crate::ooxml::OoxmlError::SchemaViolation)
    /// if the run is not inside a paragraph.
    /// The comment entry is already in the store when linking fails.
    pub fn add_comment(
        &self,
        doc: &mut Document,
        text: &str,
        author: Option<&str>,
        initials: Option<&str>,
        date: Option<&str>,
    ) -> Result<Comment> {
        let options = doc.options();
        let author = author.unwrap_or(&options.author).to_string();
        let initials = initials.unwrap_or(&options.initials).to_string();
        let date = match date {
            Some(d) => d.to_string(),
            None => options.timestamp(),
        };

        let store = doc.get_or_create_comment_store()?;
        let entry = store.add(doc.tree_mut(), &author, &initials, &date)?;
        let id = entry.id(doc.tree())?;
        let comment = Comment::from_element(entry);
        comment.set_text(doc, text)?;

        link_comment(doc.tree_mut(), self.r, id)?;
        trace!(id, "comment linked");
        Ok(comment)
    }

    /// Comments referenced from this run; dangling references are skipped.
    pub fn comments(&self, doc: &Document) -> Result<Vec<Comment>> {
        let Some(store) = doc.comment_store()? else {
            return Ok(Vec::new());
        };
        let mut comments = Vec::new();
        for id in read_reference_ids(doc.tree(), self.r, ReferenceKind::Comment)? {
            if let Some(entry) = store.get_by_id(doc.tree(), id)? {
                comments.push(Comment::from_element(entry));
            }
        }
        Ok(comments)
    }

    /// Id of the run's footnote reference, when it holds exactly one.
    pub fn footnote_id(&self, doc: &Document) -> Result<Option<i32>> {
        let ids = read_reference_ids(doc.tree(), self.r, ReferenceKind::Footnote)?;
        Ok(match ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        })
    }

    /// The footnote this run references, if it resolves.
    pub fn footnote(&self, doc: &Document) -> Result<Option<Footnote>> {
        let (Some(id), Some(store)) = (self.footnote_id(doc)?, doc.footnote_store()?) else {
            return Ok(None);
        };
        Ok(store.get_by_id(doc.tree(), id)?.map(Footnote::from_element))
    }
}

fn style_of(tree: &XmlTree, owner: NodeId, props: Tag, style: Tag) -> Result<Option<String>> {
    match tree
        .first_child_tagged(owner, props)
        .and_then(|pr| tree.first_child_tagged(pr, style))
    {
        Some(node) => tree.get_str(node, "w:val"),
        None => Ok(None),
    }
}

fn set_style_of(tree: &mut XmlTree, owner: NodeId, props: Tag, style: Tag, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            let pr = tree.get_or_add_child(owner, props)?;
            let node = tree.get_or_add_child(pr, style)?;
            tree.set_attribute(node, "w:val", Some(value.into()))
        },
        None => {
            let Some(pr) = tree.first_child_tagged(owner, props) else {
                return Ok(());
            };
            if let Some(node) = tree.first_child_tagged(pr, style) {
                tree.remove(node);
            }
            // An emptied properties element goes with its last property.
            let bare = tree.element(pr).is_some_and(|e| e.attributes().is_empty());
            if bare && tree.children(pr).is_empty() {
                tree.remove(pr);
            }
            Ok(())
        },
    }
}
