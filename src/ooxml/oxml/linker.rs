/// Cross-reference markers between body runs and annotation entries.
///
/// Markers link by id only. Nothing here checks that an id resolves to a
/// store entry; dereferencing is the caller's business and is tolerant.
use super::tag::Tag;
use super::text::{RunContent, annotation_id, append_run_content};
use super::tree::{NodeId, XmlTree};
use crate::ooxml::error::{OoxmlError, Result};

/// Which family of reference markers to read from a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `w:commentReference`
    Comment,
    /// `w:footnoteReference`
    Footnote,
}

impl ReferenceKind {
    #[inline]
    fn tag(self) -> Tag {
        match self {
            ReferenceKind::Comment => Tag::CommentReference,
            ReferenceKind::Footnote => Tag::FootnoteReference,
        }
    }
}

/// Bracket `run` with a comment range and append a comment reference to it.
///
/// After a successful call the run's previous sibling is a
/// `w:commentRangeStart`, its next sibling a `w:commentRangeEnd`, and its
/// last child a `w:commentReference`, all carrying `id`.
///
/// # Errors
///
/// [`OoxmlError::SchemaViolation`] if `run` is not an attached `w:r` or its
/// parent does not permit comment range markers.
pub fn link_comment(tree: &mut XmlTree, run: NodeId, id: i32) -> Result<()> {
    let parent = attached_run_parent(tree, run)?;
    tree.ensure_child_allowed(parent, Tag::CommentRangeStart)?;
    tree.ensure_child_allowed(parent, Tag::CommentRangeEnd)?;

    let start = tree.new_element(Tag::CommentRangeStart);
    tree.set_attribute(start, "w:id", Some(id.into()))?;
    let end = tree.new_element(Tag::CommentRangeEnd);
    tree.set_attribute(end, "w:id", Some(id.into()))?;

    tree.add_previous(run, start)?;
    tree.add_next(run, end)?;
    append_run_content(tree, run, &[RunContent::CommentReference(id)])?;
    Ok(())
}

/// Style `run` as a footnote reference and append a `w:footnoteReference`.
pub fn link_footnote_reference(tree: &mut XmlTree, run: NodeId, id: i32, style: &str) -> Result<()> {
    ensure_run(tree, run)?;
    let rpr = tree.get_or_add_child(run, Tag::RPr)?;
    let rstyle = tree.get_or_add_child(rpr, Tag::RStyle)?;
    tree.set_attribute(rstyle, "w:val", Some(style.into()))?;
    append_run_content(tree, run, &[RunContent::FootnoteReference(id)])?;
    Ok(())
}

/// Ids of the `kind` reference markers inside `run`, in document order.
pub fn read_reference_ids(tree: &XmlTree, run: NodeId, kind: ReferenceKind) -> Result<Vec<i32>> {
    tree.children_tagged(run, kind.tag())
        .map(|marker| annotation_id(tree, marker))
        .collect()
}

fn ensure_run(tree: &XmlTree, run: NodeId) -> Result<()> {
    match tree.tag(run) {
        Some(Tag::R) => Ok(()),
        _ => Err(OoxmlError::schema(tree.display_name(run), "expected w:r")),
    }
}

fn attached_run_parent(tree: &XmlTree, run: NodeId) -> Result<NodeId> {
    ensure_run(tree, run)?;
    tree.parent(run)
        .ok_or_else(|| OoxmlError::schema("w:r", "run is not attached to a paragraph"))
}
