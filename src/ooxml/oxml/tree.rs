/// Arena-backed markup tree.
///
/// Nodes live in a single `Vec` and are addressed by [`NodeId`]. Each node
/// stores its parent index and an ordered list of child indices, so sibling
/// splicing is an index-list operation. Several part trees (document body,
/// comments, footnotes) share one arena; a detached node simply has no parent
/// and is never reused.
use super::tag::Tag;
use crate::common::xml::{escape_attr, escape_text, resolve_reference};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write as FmtWrite;

/// Handle to a node in an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An element node's payload.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    /// Qualified name as written, e.g. `"w:p"`.
    qname: String,
    /// Attributes in document order, by qualified name.
    attributes: Vec<(String, String)>,
}

impl Element {
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn qname(&self) -> &str {
        &self.qname
    }

    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of markup nodes.
#[derive(Debug, Default, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
}

impl XmlTree {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element for a modeled tag.
    pub fn new_element(&mut self, tag: Tag) -> NodeId {
        let qname = tag.qname().unwrap_or_default().to_string();
        self.push(NodeData::Element(Element {
            tag,
            qname,
            attributes: Vec::new(),
        }))
    }

    /// Allocate a detached element by qualified name.
    pub fn new_element_named(&mut self, qname: &str) -> NodeId {
        self.push(NodeData::Element(Element {
            tag: Tag::from_qname(qname),
            qname: qname.to_string(),
            attributes: Vec::new(),
        }))
    }

    /// Allocate a detached text node.
    pub fn new_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Element payload, `None` for text nodes.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id).data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    /// Tag of an element node, `None` for text nodes.
    #[inline]
    pub fn tag(&self, id: NodeId) -> Option<Tag> {
        self.element(id).map(Element::tag)
    }

    /// Qualified name used in diagnostics; `#text` for text nodes.
    pub fn display_name(&self, id: NodeId) -> &str {
        self.element(id).map(Element::qname).unwrap_or("#text")
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Element children tagged `tag`, in document order.
    pub fn children_tagged(&self, id: NodeId, tag: Tag) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.tag(*c) == Some(tag))
    }

    /// First element child tagged `tag`.
    pub fn first_child_tagged(&self, id: NodeId, tag: Tag) -> Option<NodeId> {
        self.children_tagged(id, tag).next()
    }

    /// All element descendants tagged `tag`, depth first in document order.
    pub fn descendants_tagged(&self, id: NodeId, tag: Tag) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.tag(node) == Some(tag) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        found
    }

    /// Position of `child` within its parent's child list.
    pub fn index_in_parent(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|c| *c == child)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        idx.checked_sub(1).map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// Raw attribute value by qualified name.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a raw attribute, keeping its position if it already exists.
    pub fn set_raw_attribute(&mut self, id: NodeId, name: &str, value: String) -> Result<()> {
        let qname = self.display_name(id).to_string();
        let element = self
            .element_mut(id)
            .ok_or_else(|| OoxmlError::schema(qname, "text nodes have no attributes"))?;
        match element.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => element.attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Remove a raw attribute; returns whether it was present.
    pub fn remove_raw_attribute(&mut self, id: NodeId, name: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                let before = element.attributes.len();
                element.attributes.retain(|(k, _)| k != name);
                element.attributes.len() != before
            },
            None => false,
        }
    }

    /// Concatenated text of the direct text children of `id`.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            if let NodeData::Text(s) = &self.node(*child).data {
                out.push_str(s);
            }
        }
        out
    }

    /// Replace the text content of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let texts: Vec<NodeId> = self
            .children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_none())
            .collect();
        for t in texts {
            self.detach(t);
        }
        if !text.is_empty() {
            let node = self.new_text(text);
            self.append(id, node);
        }
    }

    /// Detach `id` from its parent. No-op for roots and detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Insert `child` at `index` in `parent`'s child list, detaching it first.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let len = self.children(parent).len();
        self.insert_at(parent, len, child);
    }

    /// Insert `new` immediately before `sibling`.
    pub fn add_previous(&mut self, sibling: NodeId, new: NodeId) -> Result<()> {
        let parent = self.attached_parent(sibling)?;
        self.detach(new);
        let idx = self.index_in_parent(sibling).unwrap_or(0);
        self.insert_at(parent, idx, new);
        Ok(())
    }

    /// Insert `new` immediately after `sibling`.
    pub fn add_next(&mut self, sibling: NodeId, new: NodeId) -> Result<()> {
        let parent = self.attached_parent(sibling)?;
        self.detach(new);
        let idx = self.index_in_parent(sibling).map(|i| i + 1).unwrap_or(0);
        self.insert_at(parent, idx, new);
        Ok(())
    }

    fn attached_parent(&self, id: NodeId) -> Result<NodeId> {
        self.parent(id).ok_or_else(|| {
            OoxmlError::schema(self.display_name(id), "node is not attached to a parent")
        })
    }

    /// Parse an XML document into the arena and return its root element.
    ///
    /// Whitespace-only character data is dropped everywhere except inside
    /// `w:t`, where text is kept exactly.
    pub fn parse(&mut self, xml: &[u8]) -> Result<NodeId> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let node = self.element_from_start(&e)?;
                    self.attach_parsed(&stack, &mut root, node)?;
                    stack.push(node);
                },
                Event::Empty(e) => {
                    let node = self.element_from_start(&e)?;
                    self.attach_parsed(&stack, &mut root, node)?;
                },
                Event::End(_) => {
                    stack.pop();
                },
                Event::Text(e) => {
                    if let Some(parent) = stack.last().copied() {
                        // Entity references arrive separately as `GeneralRef`.
                        let text = std::str::from_utf8(e.as_ref())?;
                        self.push_parsed_text(parent, text);
                    }
                },
                Event::CData(e) => {
                    if let Some(parent) = stack.last().copied() {
                        let text = std::str::from_utf8(e.as_ref())?.to_string();
                        self.push_parsed_text(parent, &text);
                    }
                },
                Event::GeneralRef(e) => {
                    if let Some(parent) = stack.last().copied() {
                        let name = std::str::from_utf8(&e)?;
                        let ch = resolve_reference(name).ok_or_else(|| {
                            OoxmlError::Xml(format!("Unknown entity reference: &{};", name))
                        })?;
                        let mut tmp = [0u8; 4];
                        self.push_parsed_text(parent, ch.encode_utf8(&mut tmp));
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml("Unexpected end of document".to_string()));
        }
        root.ok_or_else(|| OoxmlError::Xml("Document has no root element".to_string()))
    }

    fn element_from_start(&mut self, e: &BytesStart<'_>) -> Result<NodeId> {
        let qname = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(self.push(NodeData::Element(Element {
            tag: Tag::from_qname(&qname),
            qname,
            attributes,
        })))
    }

    fn attach_parsed(
        &mut self,
        stack: &[NodeId],
        root: &mut Option<NodeId>,
        node: NodeId,
    ) -> Result<()> {
        match stack.last() {
            Some(parent) => {
                self.append(*parent, node);
                Ok(())
            },
            None if root.is_none() => {
                *root = Some(node);
                Ok(())
            },
            None => Err(OoxmlError::Xml(
                "Document has more than one root element".to_string(),
            )),
        }
    }

    fn push_parsed_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        // Adjacent text events (e.g. around an entity) merge into one node.
        if let Some(last) = self.children(parent).last().copied()
            && let NodeData::Text(existing) = &mut self.node_mut(last).data
        {
            existing.push_str(text);
            return;
        }
        let keep_whitespace = self.tag(parent) == Some(Tag::T)
            || self.attribute(parent, "xml:space") == Some("preserve");
        if !keep_whitespace && text.trim().is_empty() {
            return;
        }
        let node = self.new_text(text);
        self.append(parent, node);
    }

    /// Serialize the subtree at `root` as a standalone XML document.
    pub fn to_xml(&self, root: NodeId) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        self.write_node(root, &mut xml)?;
        Ok(xml)
    }

    /// Serialize the subtree at `id` without an XML declaration.
    pub fn to_fragment(&self, id: NodeId) -> Result<String> {
        let mut xml = String::with_capacity(256);
        self.write_node(id, &mut xml)?;
        Ok(xml)
    }

    fn write_node(&self, id: NodeId, xml: &mut String) -> Result<()> {
        let node = self.node(id);
        match &node.data {
            NodeData::Text(s) => xml.push_str(&escape_text(s)),
            NodeData::Element(e) => {
                write!(xml, "<{}", e.qname)?;
                for (k, v) in &e.attributes {
                    write!(xml, " {}=\"{}\"", k, escape_attr(v))?;
                }
                if node.children.is_empty() {
                    xml.push_str("/>");
                } else {
                    xml.push('>');
                    for child in &node.children {
                        self.write_node(*child, xml)?;
                    }
                    write!(xml, "</{}>", e.qname)?;
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_parent_links() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(br#"<w:body><w:p><w:r><w:t>Hi</w:t></w:r></w:p><w:sectPr/></w:body>"#)
            .unwrap();
        assert_eq!(tree.tag(root), Some(Tag::Body));
        let p = tree.first_child_tagged(root, Tag::P).unwrap();
        let r = tree.first_child_tagged(p, Tag::R).unwrap();
        let t = tree.first_child_tagged(r, Tag::T).unwrap();
        assert_eq!(tree.parent(t), Some(r));
        assert_eq!(tree.text(t), "Hi");
        assert_eq!(tree.next_sibling(p).and_then(|n| tree.tag(n)), Some(Tag::SectPr));
    }

    #[test]
    fn test_whitespace_kept_only_inside_text_elements() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(b"<w:p>\n  <w:r>\n    <w:t xml:space=\"preserve\">  a  </w:t>\n  </w:r>\n</w:p>")
            .unwrap();
        let r = tree.first_child_tagged(root, Tag::R).unwrap();
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.children(r).len(), 1);
        let t = tree.first_child_tagged(r, Tag::T).unwrap();
        assert_eq!(tree.text(t), "  a  ");
    }

    #[test]
    fn test_preserved_whitespace_survives_in_unmodeled_elements() {
        let mut tree = XmlTree::new();
        let xml = concat!(
            r#"<w:r><w:delText xml:space="preserve"> </w:delText>"#,
            r#"<w:instrText xml:space="preserve">a &amp; </w:instrText></w:r>"#,
        );
        let root = tree.parse(xml.as_bytes()).unwrap();
        let del = tree.children(root)[0];
        assert_eq!(tree.tag(del), Some(Tag::Unknown));
        assert_eq!(tree.text(del), " ");
        assert_eq!(tree.text(tree.children(root)[1]), "a & ");
        assert_eq!(tree.to_fragment(root).unwrap(), xml);
    }

    #[test]
    fn test_entities_are_resolved_and_reescaped() {
        let mut tree = XmlTree::new();
        let root = tree
            .parse(br#"<w:t a="x &amp; &quot;y&quot;">R&amp;D &lt;ok&gt; &#65;</w:t>"#)
            .unwrap();
        assert_eq!(tree.text(root), "R&D <ok> A");
        assert_eq!(tree.attribute(root, "a"), Some("x & \"y\""));
        assert_eq!(
            tree.to_fragment(root).unwrap(),
            r#"<w:t a="x &amp; &quot;y&quot;">R&amp;D &lt;ok&gt; A</w:t>"#
        );
    }

    #[test]
    fn test_unknown_elements_survive_round_trip() {
        let mut tree = XmlTree::new();
        let xml = r#"<w:body><w:tbl><w:tr/></w:tbl><w:p/></w:body>"#;
        let root = tree.parse(xml.as_bytes()).unwrap();
        let tbl = tree.children(root)[0];
        assert_eq!(tree.tag(tbl), Some(Tag::Unknown));
        assert_eq!(tree.display_name(tbl), "w:tbl");
        assert_eq!(tree.to_fragment(root).unwrap(), xml);
    }

    #[test]
    fn test_sibling_splicing() {
        let mut tree = XmlTree::new();
        let p = tree.new_element(Tag::P);
        let r = tree.new_element(Tag::R);
        tree.append(p, r);
        let start = tree.new_element(Tag::CommentRangeStart);
        let end = tree.new_element(Tag::CommentRangeEnd);
        tree.add_previous(r, start).unwrap();
        tree.add_next(r, end).unwrap();
        assert_eq!(tree.children(p), &[start, r, end]);
        assert_eq!(tree.previous_sibling(r), Some(start));

        tree.detach(r);
        assert_eq!(tree.children(p), &[start, end]);
        assert_eq!(tree.parent(r), None);
        assert!(tree.add_next(r, end).is_err());
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        let mut tree = XmlTree::new();
        assert!(tree.parse(b"").is_err());
        assert!(tree.parse(b"<a/><b/>").is_err());
        assert!(tree.parse(b"<a><b></a>").is_err());
    }
}
