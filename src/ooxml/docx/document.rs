/// The main document: body content plus its annotation parts.
use crate::ooxml::docx::comment::Comment;
use crate::ooxml::docx::config::DocxOptions;
use crate::ooxml::docx::footnote::Footnote;
use crate::ooxml::docx::package::{Package, PartBlob, PartRegistry};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::{CommentStore, FootnoteStore, NodeId, Tag, XmlTree};

/// A Word document held in memory.
///
/// All parts share one [`XmlTree`]. [`Paragraph`], [`Run`](super::Run),
/// [`Comment`] and [`Footnote`] are lightweight handles into it; their
/// methods take the document explicitly.
///
/// # Examples
///
/// ```rust
/// use marginalia::ooxml::docx::Document;
///
/// let mut doc = Document::new()?;
/// let para = doc.add_paragraph("Hello world!")?;
/// let comment = para.add_comment(&mut doc, "Check this", Some("Alice"), None, None)?;
/// assert_eq!(comment.id(&doc)?, 0);
/// assert_eq!(para.comment_ids(&doc)?, vec![0]);
/// # Ok::<(), marginalia::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    tree: XmlTree,
    package: Package,
    options: DocxOptions,
}

impl Document {
    /// Create an empty document with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(DocxOptions::default())
    }

    /// Create an empty document.
    pub fn with_options(options: DocxOptions) -> Result<Self> {
        let mut tree = XmlTree::new();
        let package = Package::new(&mut tree)?;
        Ok(Self {
            tree,
            package,
            options,
        })
    }

    /// Load a document from the XML of its main document part.
    ///
    /// Comments and footnotes parts, if the document has them, are added
    /// with [`Document::add_part`].
    pub fn load(document_xml: &[u8]) -> Result<Self> {
        let mut tree = XmlTree::new();
        let package = Package::load(&mut tree, document_xml)?;
        Ok(Self {
            tree,
            package,
            options: DocxOptions::default(),
        })
    }

    /// Add or replace a part (`/word/comments.xml`, `/word/footnotes.xml`).
    pub fn add_part(&mut self, partname: &str, xml: &[u8]) -> Result<()> {
        self.package.add_part(&mut self.tree, partname, xml)
    }

    #[inline]
    pub fn options(&self) -> &DocxOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DocxOptions) {
        self.options = options;
    }

    #[inline]
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    #[inline]
    pub(crate) fn tree_mut(&mut self) -> &mut XmlTree {
        &mut self.tree
    }

    #[inline]
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// The `w:body` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.tree
            .first_child_tagged(self.package.document_root(), Tag::Body)
    }

    fn get_or_add_body(&mut self) -> Result<NodeId> {
        let root = self.package.document_root();
        self.tree.get_or_add_child(root, Tag::Body)
    }

    /// Append a paragraph to the body, before the section properties.
    ///
    /// An empty `text` yields a paragraph with no runs.
    pub fn add_paragraph(&mut self, text: &str) -> Result<Paragraph> {
        let body = self.get_or_add_body()?;
        let p = self.tree.add_child(body, Tag::P)?;
        let paragraph = Paragraph::from_node(p);
        if !text.is_empty() {
            paragraph.add_run(self, text)?;
        }
        Ok(paragraph)
    }

    /// Body paragraphs in document order.
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        match self.body() {
            Some(body) => self
                .tree
                .children_tagged(body, Tag::P)
                .map(Paragraph::from_node)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Text of all body paragraphs, one per line.
    pub fn text(&self) -> Result<String> {
        let mut lines = Vec::new();
        for paragraph in self.paragraphs() {
            lines.push(paragraph.text(self)?);
        }
        Ok(lines.join("\n"))
    }

    /// All comments in store order.
    pub fn comments(&self) -> Result<Vec<Comment>> {
        Ok(match self.comment_store()? {
            Some(store) => store
                .entries(&self.tree)
                .into_iter()
                .map(Comment::from_element)
                .collect(),
            None => Vec::new(),
        })
    }

    /// All content footnotes in store order; separator placeholders are skipped.
    pub fn footnotes(&self) -> Result<Vec<Footnote>> {
        let Some(store) = self.footnote_store()? else {
            return Ok(Vec::new());
        };
        let mut notes = Vec::new();
        for entry in store.entries(&self.tree) {
            if entry.note_type(&self.tree)?.is_normal() {
                notes.push(Footnote::from_element(entry));
            }
        }
        Ok(notes)
    }

    /// Serialize every part, main document first.
    pub fn to_parts(&self) -> Result<Vec<PartBlob>> {
        self.package.to_blobs(&self.tree)
    }

    /// The comment store, if the document has a comments part.
    pub(crate) fn comment_store(&self) -> Result<Option<CommentStore>> {
        self.package
            .comments_root()
            .map(|root| CommentStore::from_root(&self.tree, root))
            .transpose()
    }

    pub(crate) fn get_or_create_comment_store(&mut self) -> Result<CommentStore> {
        let root = self.package.get_or_create_comments_root(&mut self.tree)?;
        CommentStore::from_root(&self.tree, root)
    }

    /// The footnote store, if the document has a footnotes part.
    pub(crate) fn footnote_store(&self) -> Result<Option<FootnoteStore>> {
        self.package
            .footnotes_root()
            .map(|root| FootnoteStore::from_root(&self.tree, root))
            .transpose()
    }

    pub(crate) fn get_or_create_footnote_store(&mut self) -> Result<FootnoteStore> {
        let root = self.package.get_or_create_footnotes_root(&mut self.tree)?;
        FootnoteStore::from_root(&self.tree, root)
    }
}
