//! Office Open XML (OOXML) WordprocessingML support.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): partnames, content types and XML parts
//! 2. **Element Layer** (`oxml`): the markup arena, static schema tables,
//!    annotation stores, reference linking and the run text codec
//! 3. **Document Layer** (`docx`): `Document`, `Paragraph`, `Run`,
//!    `Comment` and `Footnote` handles
//!
//! Mutation flows top-down (document layer, then stores and linker, then
//! schema-checked element operations); reads flow back up as decoded text
//! and ids.
//!
//! # Example
//!
//! ```rust
//! use marginalia::ooxml::docx::Document;
//!
//! let mut doc = Document::new()?;
//! let para = doc.add_paragraph("Body text")?;
//! let note = para.add_footnote(&mut doc, "A footnote")?;
//! assert_eq!(note.id(&doc)?, 1);
//! # Ok::<(), marginalia::ooxml::OoxmlError>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;
pub mod oxml;

pub use opc::PackURI;

pub use error::{OoxmlError, Result};
