/// Element wrappers for the comments part (`w:comments`, `w:comment`).
use super::ids::next_id;
use super::tag::Tag;
use super::text::annotation_id;
use super::tree::{NodeId, XmlTree};
use crate::ooxml::error::{OoxmlError, Result};
use tracing::trace;

/// A `<w:comments>` element: the ordered store of comment entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStore {
    root: NodeId,
}

impl CommentStore {
    /// Wrap the root of a comments part.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`] if `root` is not a `w:comments` element.
    pub fn from_root(tree: &XmlTree, root: NodeId) -> Result<Self> {
        if tree.tag(root) != Some(Tag::Comments) {
            return Err(OoxmlError::schema(
                tree.display_name(root),
                "expected a w:comments root",
            ));
        }
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Entries in store order.
    pub fn entries(&self, tree: &XmlTree) -> Vec<CommentElement> {
        tree.children_tagged(self.root, Tag::Comment)
            .map(CommentElement)
            .collect()
    }

    pub fn len(&self, tree: &XmlTree) -> usize {
        tree.children_tagged(self.root, Tag::Comment).count()
    }

    pub fn is_empty(&self, tree: &XmlTree) -> bool {
        self.len(tree) == 0
    }

    /// Ids of all entries in store order.
    pub fn ids(&self, tree: &XmlTree) -> Result<Vec<i32>> {
        self.entries(tree).iter().map(|c| c.id(tree)).collect()
    }

    /// Id the next added comment will receive: one past the maximum, or 0.
    pub fn next_id(&self, tree: &XmlTree) -> Result<i32> {
        next_id(self.ids(tree)?, 0)
    }

    /// Append a new comment carrying the given metadata and one empty
    /// content paragraph.
    pub fn add(&self, tree: &mut XmlTree, author: &str, initials: &str, date: &str) -> Result<CommentElement> {
        let id = self.next_id(tree)?;
        let node = tree.add_child(self.root, Tag::Comment)?;
        tree.set_attribute(node, "w:id", Some(id.into()))?;
        tree.set_attribute(node, "w:author", Some(author.into()))?;
        tree.set_attribute(node, "w:initials", Some(initials.into()))?;
        tree.set_attribute(node, "w:date", Some(date.into()))?;
        tree.add_child(node, Tag::P)?;
        trace!(id, author, "comment added");
        Ok(CommentElement(node))
    }

    /// Entry with the given id; linear scan in store order.
    pub fn get_by_id(&self, tree: &XmlTree, id: i32) -> Result<Option<CommentElement>> {
        for entry in self.entries(tree) {
            if entry.id(tree)? == id {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

/// A `<w:comment>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentElement(pub(crate) NodeId);

impl CommentElement {
    /// Wrap an existing `w:comment` node.
    pub fn from_node(tree: &XmlTree, node: NodeId) -> Result<Self> {
        match tree.tag(node) {
            Some(Tag::Comment) => Ok(Self(node)),
            _ => Err(OoxmlError::schema(tree.display_name(node), "expected w:comment")),
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.0
    }

    pub fn id(&self, tree: &XmlTree) -> Result<i32> {
        annotation_id(tree, self.0)
    }

    pub fn author(&self, tree: &XmlTree) -> Result<String> {
        self.required_str(tree, "w:author")
    }

    pub fn set_author(&self, tree: &mut XmlTree, author: &str) -> Result<()> {
        tree.set_attribute(self.0, "w:author", Some(author.into()))
    }

    pub fn initials(&self, tree: &XmlTree) -> Result<String> {
        self.required_str(tree, "w:initials")
    }

    pub fn set_initials(&self, tree: &mut XmlTree, initials: &str) -> Result<()> {
        tree.set_attribute(self.0, "w:initials", Some(initials.into()))
    }

    pub fn date(&self, tree: &XmlTree) -> Result<String> {
        self.required_str(tree, "w:date")
    }

    pub fn set_date(&self, tree: &mut XmlTree, date: &str) -> Result<()> {
        tree.set_attribute(self.0, "w:date", Some(date.into()))
    }

    /// The content paragraph, if present.
    pub fn paragraph(&self, tree: &XmlTree) -> Option<NodeId> {
        tree.first_child_tagged(self.0, Tag::P)
    }

    /// The content paragraph, created when absent.
    pub fn get_or_add_paragraph(&self, tree: &mut XmlTree) -> Result<NodeId> {
        tree.get_or_add_child(self.0, Tag::P)
    }

    fn required_str(&self, tree: &XmlTree, name: &str) -> Result<String> {
        tree.get_str(self.0, name)?
            .ok_or_else(|| OoxmlError::schema("w:comment", format!("'{}' is missing", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(tree: &mut XmlTree) -> CommentStore {
        let root = tree.new_element(Tag::Comments);
        CommentStore::from_root(tree, root).unwrap()
    }

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut tree = XmlTree::new();
        let store = store(&mut tree);
        let mut ids = Vec::new();
        for _ in 0..5 {
            let c = store.add(&mut tree, "Alice", "A", "2024-01-01T00:00:00Z").unwrap();
            ids.push(c.id(&tree).unwrap());
        }
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(store.len(&tree), 5);
    }

    #[test]
    fn test_next_id_follows_maximum_of_parsed_entries() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(
                br#"<w:comments><w:comment w:id="7" w:author="a" w:initials="a" w:date="d"><w:p/></w:comment><w:comment w:id="2" w:author="b" w:initials="b" w:date="d"><w:p/></w:comment></w:comments>"#,
            )
            .unwrap();
        let store = CommentStore::from_root(&tree, root).unwrap();
        let added = store.add(&mut tree, "c", "c", "d").unwrap();
        assert_eq!(added.id(&tree).unwrap(), 8);
        assert_eq!(store.entries(&tree).last(), Some(&added));
    }

    #[test]
    fn test_new_entry_shape() {
        let mut tree = XmlTree::new();
        let store = store(&mut tree);
        let c = store.add(&mut tree, "Alice", "AL", "2024-05-06T07:08:09").unwrap();
        assert_eq!(c.author(&tree).unwrap(), "Alice");
        assert_eq!(c.initials(&tree).unwrap(), "AL");
        assert_eq!(c.date(&tree).unwrap(), "2024-05-06T07:08:09");
        assert_eq!(tree.children(c.node()).len(), 1);
        assert!(c.paragraph(&tree).is_some());
        assert_eq!(
            tree.to_fragment(c.node()).unwrap(),
            r#"<w:comment w:id="0" w:author="Alice" w:initials="AL" w:date="2024-05-06T07:08:09"><w:p/></w:comment>"#
        );
    }

    #[test]
    fn test_metadata_setters() {
        let mut tree = XmlTree::new();
        let store = store(&mut tree);
        let c = store.add(&mut tree, "Alice", "A", "d").unwrap();
        c.set_author(&mut tree, "Bob").unwrap();
        c.set_initials(&mut tree, "BB").unwrap();
        c.set_date(&mut tree, "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(c.author(&tree).unwrap(), "Bob");
        assert_eq!(c.initials(&tree).unwrap(), "BB");
        assert_eq!(c.date(&tree).unwrap(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_get_by_id() {
        let mut tree = XmlTree::new();
        let store = store(&mut tree);
        let first = store.add(&mut tree, "a", "a", "d").unwrap();
        let second = store.add(&mut tree, "b", "b", "d").unwrap();
        assert_eq!(store.get_by_id(&tree, 1).unwrap(), Some(second));
        assert_eq!(store.get_by_id(&tree, 0).unwrap(), Some(first));
        assert_eq!(store.get_by_id(&tree, 7).unwrap(), None);
    }

    #[test]
    fn test_missing_required_metadata_is_violation() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(br#"<w:comments><w:comment w:id="0" w:author="a"/></w:comments>"#)
            .unwrap();
        let store = CommentStore::from_root(&tree, root).unwrap();
        let c = store.entries(&tree)[0];
        assert!(matches!(
            c.initials(&tree),
            Err(OoxmlError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let mut tree = XmlTree::new();
        let root = tree.new_element(Tag::Footnotes);
        assert!(CommentStore::from_root(&tree, root).is_err());
    }
}
