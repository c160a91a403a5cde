/// Element wrappers for the footnotes part (`w:footnotes`, `w:footnote`).
use super::ids::next_id;
use super::tag::Tag;
use super::text::{RunContent, annotation_id, append_run_content};
use super::tree::{NodeId, XmlTree};
use crate::ooxml::error::{OoxmlError, Result};
use tracing::trace;

/// Character style applied to footnote reference marks.
pub const FOOTNOTE_REFERENCE_STYLE: &str = "FootnoteReference";

/// Paragraph style applied to footnote content.
pub const FOOTNOTE_TEXT_STYLE: &str = "FootnoteText";

/// Id given to the first footnote of a store with no entries at all.
///
/// Ids -1 and 0 belong to the separator placeholders a footnotes part
/// normally carries, so the first real note is 1 either way.
pub const FIRST_FOOTNOTE_ID: i32 = 1;

/// The kind of a footnote entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    /// Normal note with content
    Normal,
    /// Separator note (visual separator)
    Separator,
    /// Continuation separator
    ContinuationSeparator,
    /// Continuation notice
    ContinuationNotice,
}

impl NoteType {
    fn from_xml(s: &str) -> Self {
        match s {
            "separator" => Self::Separator,
            "continuationSeparator" => Self::ContinuationSeparator,
            "continuationNotice" => Self::ContinuationNotice,
            _ => Self::Normal,
        }
    }

    /// Check if this is a normal content note (not a separator).
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// A `<w:footnotes>` element: the ordered store of footnote entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootnoteStore {
    root: NodeId,
}

impl FootnoteStore {
    /// Wrap the root of a footnotes part.
    pub fn from_root(tree: &XmlTree, root: NodeId) -> Result<Self> {
        if tree.tag(root) != Some(Tag::Footnotes) {
            return Err(OoxmlError::schema(
                tree.display_name(root),
                "expected a w:footnotes root",
            ));
        }
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Entries in store order, placeholders included.
    pub fn entries(&self, tree: &XmlTree) -> Vec<FootnoteElement> {
        tree.children_tagged(self.root, Tag::Footnote)
            .map(FootnoteElement)
            .collect()
    }

    pub fn len(&self, tree: &XmlTree) -> usize {
        tree.children_tagged(self.root, Tag::Footnote).count()
    }

    pub fn is_empty(&self, tree: &XmlTree) -> bool {
        self.len(tree) == 0
    }

    pub fn ids(&self, tree: &XmlTree) -> Result<Vec<i32>> {
        self.entries(tree).iter().map(|f| f.id(tree)).collect()
    }

    /// One past the maximum id, placeholders included; [`FIRST_FOOTNOTE_ID`]
    /// for a store with no entries.
    pub fn next_id(&self, tree: &XmlTree) -> Result<i32> {
        next_id(self.ids(tree)?, FIRST_FOOTNOTE_ID)
    }

    /// Append a new footnote whose content paragraph holds the reference mark.
    ///
    /// The paragraph is styled `text_style` and its first run, styled
    /// `reference_style`, carries a `w:footnoteRef`. Note text goes in runs
    /// added after it.
    pub fn add(&self, tree: &mut XmlTree, reference_style: &str, text_style: &str) -> Result<FootnoteElement> {
        let id = self.next_id(tree)?;
        let node = tree.add_child(self.root, Tag::Footnote)?;
        tree.set_attribute(node, "w:id", Some(id.into()))?;

        let p = tree.add_child(node, Tag::P)?;
        let ppr = tree.get_or_add_child(p, Tag::PPr)?;
        let pstyle = tree.get_or_add_child(ppr, Tag::PStyle)?;
        tree.set_attribute(pstyle, "w:val", Some(text_style.into()))?;

        let r = tree.add_child(p, Tag::R)?;
        let rpr = tree.get_or_add_child(r, Tag::RPr)?;
        let rstyle = tree.get_or_add_child(rpr, Tag::RStyle)?;
        tree.set_attribute(rstyle, "w:val", Some(reference_style.into()))?;
        append_run_content(tree, r, &[RunContent::FootnoteRef])?;

        trace!(id, "footnote added");
        Ok(FootnoteElement(node))
    }

    /// Entry with the given id; linear scan in store order.
    pub fn get_by_id(&self, tree: &XmlTree, id: i32) -> Result<Option<FootnoteElement>> {
        for entry in self.entries(tree) {
            if entry.id(tree)? == id {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

/// A `<w:footnote>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FootnoteElement(pub(crate) NodeId);

impl FootnoteElement {
    /// Wrap an existing `w:footnote` node.
    pub fn from_node(tree: &XmlTree, node: NodeId) -> Result<Self> {
        match tree.tag(node) {
            Some(Tag::Footnote) => Ok(Self(node)),
            _ => Err(OoxmlError::schema(tree.display_name(node), "expected w:footnote")),
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.0
    }

    pub fn id(&self, tree: &XmlTree) -> Result<i32> {
        annotation_id(tree, self.0)
    }

    pub fn note_type(&self, tree: &XmlTree) -> Result<NoteType> {
        let raw = tree.get_str(self.0, "w:type")?.unwrap_or_default();
        Ok(NoteType::from_xml(&raw))
    }

    /// The content paragraph, if present.
    pub fn paragraph(&self, tree: &XmlTree) -> Option<NodeId> {
        tree.first_child_tagged(self.0, Tag::P)
    }

    /// The content paragraph, created when absent.
    pub fn get_or_add_paragraph(&self, tree: &mut XmlTree) -> Result<NodeId> {
        tree.get_or_add_child(self.0, Tag::P)
    }

    /// Run of the content paragraph holding the `w:footnoteRef` mark.
    pub fn reference_run(&self, tree: &XmlTree) -> Option<NodeId> {
        let p = self.paragraph(tree)?;
        tree.children_tagged(p, Tag::R)
            .find(|r| tree.first_child_tagged(*r, Tag::FootnoteRef).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEDED: &[u8] = br#"<w:footnotes><w:footnote w:type="separator" w:id="-1"><w:p/></w:footnote><w:footnote w:type="continuationSeparator" w:id="0"><w:p/></w:footnote></w:footnotes>"#;

    fn seeded(tree: &mut XmlTree) -> FootnoteStore {
        let root = tree.parse(SEEDED).unwrap();
        FootnoteStore::from_root(tree, root).unwrap()
    }

    fn add(store: &FootnoteStore, tree: &mut XmlTree) -> FootnoteElement {
        store
            .add(tree, FOOTNOTE_REFERENCE_STYLE, FOOTNOTE_TEXT_STYLE)
            .unwrap()
    }

    #[test]
    fn test_seeded_store_allocates_from_one() {
        let mut tree = XmlTree::new();
        let store = seeded(&mut tree);
        let mut ids = Vec::new();
        for _ in 0..4 {
            let f = add(&store, &mut tree);
            ids.push(f.id(&tree).unwrap());
        }
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_single_placeholder_seed() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(br#"<w:footnotes><w:footnote w:id="0"><w:p/></w:footnote></w:footnotes>"#)
            .unwrap();
        let store = FootnoteStore::from_root(&tree, root).unwrap();
        assert_eq!(add(&store, &mut tree).id(&tree).unwrap(), 1);
        assert_eq!(add(&store, &mut tree).id(&tree).unwrap(), 2);
    }

    #[test]
    fn test_empty_store_uses_explicit_base() {
        let mut tree = XmlTree::new();
        let root = tree.new_element(Tag::Footnotes);
        let store = FootnoteStore::from_root(&tree, root).unwrap();
        assert_eq!(store.next_id(&tree).unwrap(), FIRST_FOOTNOTE_ID);
        assert_eq!(add(&store, &mut tree).id(&tree).unwrap(), 1);
    }

    #[test]
    fn test_new_entry_content() {
        let mut tree = XmlTree::new();
        let store = seeded(&mut tree);
        let f = add(&store, &mut tree);
        assert_eq!(
            tree.to_fragment(f.node()).unwrap(),
            concat!(
                r#"<w:footnote w:id="1"><w:p><w:pPr><w:pStyle w:val="FootnoteText"/></w:pPr>"#,
                r#"<w:r><w:rPr><w:rStyle w:val="FootnoteReference"/></w:rPr><w:footnoteRef/></w:r>"#,
                r#"</w:p></w:footnote>"#
            )
        );
        assert!(f.reference_run(&tree).is_some());
        assert_eq!(f.note_type(&tree).unwrap(), NoteType::Normal);
    }

    #[test]
    fn test_placeholders_report_their_type() {
        let mut tree = XmlTree::new();
        let store = seeded(&mut tree);
        let types: Vec<NoteType> = store
            .entries(&tree)
            .iter()
            .map(|f| f.note_type(&tree).unwrap())
            .collect();
        assert_eq!(types, vec![NoteType::Separator, NoteType::ContinuationSeparator]);
        assert!(!types[0].is_normal());
    }

    #[test]
    fn test_get_by_id_is_tolerant() {
        let mut tree = XmlTree::new();
        let store = seeded(&mut tree);
        let f = add(&store, &mut tree);
        assert_eq!(store.get_by_id(&tree, 1).unwrap(), Some(f));
        assert_eq!(store.get_by_id(&tree, 42).unwrap(), None);
    }
}
