/// Word (.docx) document support.
///
/// This module provides the document-level view over WordprocessingML
/// markup: paragraphs and runs in the body, and the comments and footnotes
/// they reference.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Package`: the modeled parts of a .docx package
/// - `Document`: the main document content and API
/// - `Paragraph`: a paragraph with runs
/// - `Run`: a text run
/// - `Comment` / `Footnote`: annotation entries
///
/// # Example
///
/// ```rust
/// use marginalia::ooxml::docx::Document;
///
/// let mut doc = Document::new()?;
/// let para = doc.add_paragraph("Hello world!")?;
/// para.add_run(&mut doc, " Second run!")?;
///
/// let first = para.runs(&doc)[0];
/// first.add_comment(&mut doc, "New comment", Some("Alice"), None, None)?;
/// para.add_footnote(&mut doc, "New footnote")?;
///
/// assert_eq!(para.comment_ids(&doc)?, vec![0]);
/// assert_eq!(para.footnote_ids(&doc)?, vec![1]);
/// # Ok::<(), marginalia::ooxml::OoxmlError>(())
/// ```
pub mod comment;
pub mod config;
pub mod document;
pub mod footnote;
pub mod package;
pub mod paragraph;
pub mod template;

pub use comment::Comment;
pub use config::{DateSource, DocxOptions};
pub use document::Document;
pub use footnote::Footnote;
pub use package::{Package, PartBlob, PartKind, PartRegistry};
pub use paragraph::{Paragraph, Run};
