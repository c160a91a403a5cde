//! Marginalia - schema-aware WordprocessingML editing with comments and footnotes
//!
//! This library models the parts of a Word document that annotations touch:
//! body paragraphs and runs, the comments part and the footnotes part. All
//! markup lives in one arena and every element insertion is checked against
//! static schema tables, so sibling order stays valid however content is
//! added.
//!
//! # Features
//!
//! - **Schema-checked elements**: typed attribute codecs, singleton and
//!   repeatable children inserted at their schema position
//! - **Comments**: id allocation, range markers bracketing the anchor run,
//!   metadata access
//! - **Footnotes**: separator-seeded id allocation, reference runs, styled
//!   content paragraphs
//! - **Run text codec**: plain text with tabs and line breaks to and from run
//!   content
//! - **Tolerant reads**: dangling references yield empty results, not errors
//!
//! # Example
//!
//! ```rust
//! use marginalia::ooxml::docx::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new()?;
//! let para = doc.add_paragraph("Hello world!")?;
//! let comment = para.add_comment(&mut doc, "New comment", Some("Alice"), None, None)?;
//! let footnote = para.add_footnote(&mut doc, "New footnote")?;
//!
//! assert_eq!(comment.text(&doc)?, "New comment");
//! assert_eq!(footnote.id(&doc)?, 1);
//!
//! // Each modeled part serializes back to XML.
//! for part in doc.to_parts()? {
//!     println!("{} ({} bytes)", part.partname, part.xml.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared helpers (XML escaping)
pub mod common;

/// OOXML (Office Open XML) WordprocessingML support
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::docx::{Comment, Document, DocxOptions, Footnote, Paragraph, Run};
pub use ooxml::{OoxmlError, Result};
