/// Schema-checked element operations.
///
/// These sit on top of the raw arena operations in [`XmlTree`] and consult
/// the static schema fragments in [`super::schema`]. Every higher-level
/// "append" in the crate goes through [`XmlTree::insert_element_before`], which
/// is what keeps sibling order valid.
use super::schema::{Cardinality, Presence, Successors, spec_for};
use super::simpletypes::TypedValue;
use super::tag::Tag;
use super::tree::{NodeId, XmlTree};
use crate::ooxml::error::{OoxmlError, Result};

impl XmlTree {
    /// Read a declared attribute through its codec.
    ///
    /// Optional attributes that are absent yield their declared default, or
    /// `None` when there is none.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`] if the attribute is not declared for
    /// the element, is required but missing, or fails to parse.
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Result<Option<TypedValue>> {
        let tag = self.element_tag(node)?;
        let spec = spec_for(tag).attribute(name).ok_or_else(|| {
            OoxmlError::schema(self.display_name(node), format!("undeclared attribute '{}'", name))
        })?;

        let raw = match (self.attribute(node, name), spec.presence) {
            (Some(raw), _) => raw,
            (None, Presence::Optional { default: Some(d) }) => d,
            (None, Presence::Optional { default: None }) => return Ok(None),
            (None, Presence::Required) => {
                return Err(OoxmlError::schema(
                    self.display_name(node),
                    format!("required attribute '{}' is missing", name),
                ));
            },
        };

        spec.ty.parse(raw).map(Some).map_err(|reason| {
            OoxmlError::schema(self.display_name(node), format!("attribute '{}': {}", name, reason))
        })
    }

    /// Read a required integer attribute.
    pub fn get_int(&self, node: NodeId, name: &str) -> Result<i64> {
        self.get_attribute(node, name)?
            .and_then(|v| v.as_int())
            .ok_or_else(|| {
                OoxmlError::schema(self.display_name(node), format!("'{}' is not an integer", name))
            })
    }

    /// Read a string-valued attribute; `None` when optional and absent.
    pub fn get_str(&self, node: NodeId, name: &str) -> Result<Option<String>> {
        match self.get_attribute(node, name)? {
            None => Ok(None),
            Some(TypedValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(OoxmlError::schema(
                self.display_name(node),
                format!("'{}' holds {:?}, not a string", name, other),
            )),
        }
    }

    /// Write a declared attribute through its codec.
    ///
    /// `None` removes an optional attribute instead of writing an empty token.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`] if the attribute is undeclared, the
    /// value does not fit the codec, or `None` is given for a required one.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: Option<TypedValue>) -> Result<()> {
        let tag = self.element_tag(node)?;
        let spec = spec_for(tag).attribute(name).ok_or_else(|| {
            OoxmlError::schema(self.display_name(node), format!("undeclared attribute '{}'", name))
        })?;

        match value {
            Some(value) => {
                let token = spec.ty.serialize(&value).map_err(|reason| {
                    OoxmlError::schema(self.display_name(node), format!("attribute '{}': {}", name, reason))
                })?;
                self.set_raw_attribute(node, name, token)
            },
            None if spec.presence == Presence::Required => Err(OoxmlError::schema(
                self.display_name(node),
                format!("required attribute '{}' cannot be removed", name),
            )),
            None => {
                self.remove_raw_attribute(node, name);
                Ok(())
            },
        }
    }

    /// Return the `tag` child of `parent`, creating it at its schema position
    /// when absent.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`] if `tag` is not declared as an
    /// at-most-one child of `parent`.
    pub fn get_or_add_child(&mut self, parent: NodeId, tag: Tag) -> Result<NodeId> {
        let child_spec = self.child_spec(parent, tag)?;
        if child_spec.cardinality != Cardinality::ZeroOrOne {
            return Err(OoxmlError::schema(
                self.display_name(parent),
                format!("{:?} is repeatable; use add_child", tag),
            ));
        }
        if let Some(existing) = self.first_child_tagged(parent, tag) {
            return Ok(existing);
        }
        let child = self.new_element(tag);
        self.insert_element_before(parent, child, child_spec.successors);
        Ok(child)
    }

    /// Construct a new `tag` child of `parent` at its schema position.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::SchemaViolation`] if `tag` is not a permitted child, or
    /// is an at-most-one child that already exists.
    pub fn add_child(&mut self, parent: NodeId, tag: Tag) -> Result<NodeId> {
        let child_spec = self.child_spec(parent, tag)?;
        if child_spec.cardinality == Cardinality::ZeroOrOne
            && self.first_child_tagged(parent, tag).is_some()
        {
            return Err(OoxmlError::schema(
                self.display_name(parent),
                format!("at most one {:?} child is allowed", tag),
            ));
        }
        let child = self.new_element(tag);
        self.insert_element_before(parent, child, child_spec.successors);
        Ok(child)
    }

    /// Insert `child` before the first child of `parent` whose tag is in
    /// `successors`, or last when there is none.
    pub fn insert_element_before(&mut self, parent: NodeId, child: NodeId, successors: Successors) {
        let position = self
            .children(parent)
            .iter()
            .position(|c| self.tag(*c).is_some_and(|t| successors.contains(t)));
        match position {
            Some(idx) => self.insert_at(parent, idx, child),
            None => self.append(parent, child),
        }
    }

    /// Check that `tag` may appear under `parent`.
    pub fn ensure_child_allowed(&self, parent: NodeId, tag: Tag) -> Result<()> {
        self.child_spec(parent, tag).map(|_| ())
    }

    /// Detach `node` from the tree. References to it elsewhere are not touched.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// Remove every child of `node` except those tagged `keep`.
    pub fn clear_children_except(&mut self, node: NodeId, keep: &[Tag]) {
        let doomed: Vec<NodeId> = self
            .children(node)
            .iter()
            .copied()
            .filter(|c| !self.tag(*c).is_some_and(|t| keep.contains(&t)))
            .collect();
        for child in doomed {
            self.detach(child);
        }
    }

    fn element_tag(&self, node: NodeId) -> Result<Tag> {
        self.tag(node)
            .ok_or_else(|| OoxmlError::schema("#text", "text nodes carry no schema"))
    }

    fn child_spec(&self, parent: NodeId, tag: Tag) -> Result<&'static super::schema::ChildSpec> {
        let parent_tag = self.element_tag(parent)?;
        spec_for(parent_tag).child(tag).ok_or_else(|| {
            OoxmlError::schema(
                self.display_name(parent),
                format!("{} is not a permitted child", tag.qname().unwrap_or("unknown element")),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comment(tree: &mut XmlTree) -> NodeId {
        tree.new_element(Tag::Comment)
    }

    #[test]
    fn test_required_attribute_missing_is_violation() {
        let mut tree = XmlTree::new();
        let c = comment(&mut tree);
        let err = tree.get_attribute(c, "w:id").unwrap_err();
        assert!(matches!(err, OoxmlError::SchemaViolation { .. }));
    }

    #[test]
    fn test_attribute_codec_failure_is_violation() {
        let mut tree = XmlTree::new();
        let c = comment(&mut tree);
        tree.set_raw_attribute(c, "w:id", "seven".to_string()).unwrap();
        assert!(matches!(
            tree.get_int(c, "w:id"),
            Err(OoxmlError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_typed_round_trip() {
        let mut tree = XmlTree::new();
        let c = comment(&mut tree);
        tree.set_attribute(c, "w:id", Some(TypedValue::Int(3))).unwrap();
        tree.set_attribute(c, "w:author", Some("Alice".into())).unwrap();
        assert_eq!(tree.attribute(c, "w:id"), Some("3"));
        assert_eq!(tree.get_int(c, "w:id").unwrap(), 3);
        assert_eq!(tree.get_str(c, "w:author").unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn test_undeclared_attribute_is_violation() {
        let mut tree = XmlTree::new();
        let c = comment(&mut tree);
        assert!(tree.get_attribute(c, "w:type").is_err());
        assert!(tree.set_attribute(c, "w:type", Some("x".into())).is_err());
    }

    #[test]
    fn test_optional_attribute_default_and_removal() {
        let mut tree = XmlTree::new();
        let br = tree.new_element(Tag::Br);
        assert_eq!(tree.get_str(br, "w:type").unwrap().as_deref(), Some("textWrapping"));
        assert_eq!(tree.get_str(br, "w:clear").unwrap(), None);

        tree.set_attribute(br, "w:type", Some("page".into())).unwrap();
        assert_eq!(tree.attribute(br, "w:type"), Some("page"));
        tree.set_attribute(br, "w:type", None).unwrap();
        assert_eq!(tree.attribute(br, "w:type"), None);

        assert!(tree.set_attribute(br, "w:type", Some("sideways".into())).is_err());
    }

    #[test]
    fn test_required_attribute_cannot_be_cleared() {
        let mut tree = XmlTree::new();
        let c = comment(&mut tree);
        assert!(tree.set_attribute(c, "w:date", None).is_err());
    }

    #[test]
    fn test_get_or_add_child_is_idempotent_and_leads() {
        let mut tree = XmlTree::new();
        let r = tree.new_element(Tag::R);
        let t = tree.add_child(r, Tag::T).unwrap();
        let rpr = tree.get_or_add_child(r, Tag::RPr).unwrap();
        assert_eq!(tree.children(r), &[rpr, t]);
        assert_eq!(tree.get_or_add_child(r, Tag::RPr).unwrap(), rpr);
        assert_eq!(tree.children(r).len(), 2);
    }

    #[test]
    fn test_add_child_rejects_undeclared_and_duplicate_singletons() {
        let mut tree = XmlTree::new();
        let r = tree.new_element(Tag::R);
        assert!(tree.add_child(r, Tag::P).is_err());
        tree.add_child(r, Tag::RPr).unwrap();
        assert!(tree.add_child(r, Tag::RPr).is_err());
        assert!(tree.get_or_add_child(r, Tag::T).is_err());
    }

    #[derive(Debug, Clone, Copy)]
    enum BodyChild {
        Paragraph,
        SectionProperties,
    }

    fn body_child() -> impl Strategy<Value = BodyChild> {
        prop_oneof![Just(BodyChild::Paragraph), Just(BodyChild::SectionProperties)]
    }

    fn run_child() -> impl Strategy<Value = Tag> {
        prop_oneof![
            Just(Tag::RPr),
            Just(Tag::T),
            Just(Tag::Tab),
            Just(Tag::Br),
            Just(Tag::CommentReference),
            Just(Tag::FootnoteRef),
        ]
    }

    fn assert_no_successor_precedes(tree: &XmlTree, parent: NodeId) {
        let parent_spec = spec_for(tree.tag(parent).unwrap());
        let children = tree.children(parent);
        for (i, child) in children.iter().enumerate() {
            let spec = parent_spec.child(tree.tag(*child).unwrap()).unwrap();
            for later in &children[..i] {
                let later_tag = tree.tag(*later).unwrap();
                // An earlier sibling must never be one that is declared to follow `child`,
                // unless it is the same tag (repeatable children follow one another).
                if later_tag != spec.tag {
                    assert!(
                        !spec.successors.contains(later_tag),
                        "{:?} precedes {:?}",
                        later_tag,
                        spec.tag
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_body_order_is_preserved(inserts in prop::collection::vec(body_child(), 0..24)) {
            let mut tree = XmlTree::new();
            let body = tree.new_element(Tag::Body);
            for child in inserts {
                match child {
                    BodyChild::Paragraph => { tree.add_child(body, Tag::P).unwrap(); },
                    BodyChild::SectionProperties => { tree.get_or_add_child(body, Tag::SectPr).unwrap(); },
                }
            }
            assert_no_successor_precedes(&tree, body);
        }

        #[test]
        fn prop_run_order_is_preserved(inserts in prop::collection::vec(run_child(), 0..24)) {
            let mut tree = XmlTree::new();
            let r = tree.new_element(Tag::R);
            for tag in inserts {
                if tag == Tag::RPr {
                    tree.get_or_add_child(r, tag).unwrap();
                } else {
                    tree.add_child(r, tag).unwrap();
                }
            }
            assert_no_successor_precedes(&tree, r);
            if let Some(rpr) = tree.first_child_tagged(r, Tag::RPr) {
                prop_assert_eq!(tree.children(r)[0], rpr);
            }
        }
    }
}
