//! Schema-checked WordprocessingML element layer.
//!
//! Every part tree lives in one [`XmlTree`] arena. Elements are addressed by
//! [`NodeId`]; their permitted attributes and children come from the static
//! tables in [`schema`], and every child insertion goes through the ordered
//! primitive [`XmlTree::insert_element_before`].
//!
//! On top of that sit the annotation stores ([`CommentStore`],
//! [`FootnoteStore`]), the reference linker and the run text codec.

pub mod comments;
pub mod element;
pub mod footnotes;
pub mod ids;
pub mod linker;
pub mod schema;
pub mod simpletypes;
pub mod tag;
pub mod text;
pub mod tree;

pub use comments::{CommentElement, CommentStore};
pub use footnotes::{
    FIRST_FOOTNOTE_ID, FOOTNOTE_REFERENCE_STYLE, FOOTNOTE_TEXT_STYLE, FootnoteElement, FootnoteStore,
    NoteType,
};
pub use ids::next_id;
pub use linker::{ReferenceKind, link_comment, link_footnote_reference, read_reference_ids};
pub use schema::{Cardinality, ElementSpec, Presence, Successors, spec_for};
pub use simpletypes::{SimpleType, TypedValue};
pub use tag::Tag;
pub use text::{BreakType, RunContent, decode, encode};
pub use tree::{Element, NodeId, XmlTree};
