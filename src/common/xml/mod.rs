//! XML text helpers shared by the part parser and serializer.

mod escape;

pub use escape::{escape_attr, escape_text, resolve_reference};
