/// Conversion between plain text and run inner content.
///
/// [`encode`] and [`decode`] are pure functions over [`RunContent`] sequences;
/// [`read_run_content`] and [`append_run_content`] move those sequences in and
/// out of a `w:r` element.
use super::tag::Tag;
use super::tree::{NodeId, XmlTree};
use crate::ooxml::error::Result;
use serde::Serialize;
use smallvec::SmallVec;

/// Kind of a `w:br` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakType {
    TextWrapping,
    Page,
    Column,
}

impl BreakType {
    fn from_xml(s: &str) -> Self {
        match s {
            "page" => BreakType::Page,
            "column" => BreakType::Column,
            _ => BreakType::TextWrapping,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            BreakType::TextWrapping => "textWrapping",
            BreakType::Page => "page",
            BreakType::Column => "column",
        }
    }
}

/// One item of a run's inner content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RunContent {
    /// `w:t`
    Text(String),
    /// `w:tab`
    Tab,
    /// `w:ptab`
    AbsoluteTab,
    /// `w:br`
    Break(BreakType),
    /// `w:cr`
    CarriageReturn,
    /// `w:noBreakHyphen`
    NoBreakHyphen,
    /// `w:drawing`
    Drawing,
    /// `w:lastRenderedPageBreak`
    RenderedPageBreak,
    /// `w:commentReference`
    CommentReference(i32),
    /// `w:footnoteReference`
    FootnoteReference(i32),
    /// `w:footnoteRef`
    FootnoteRef,
}

impl RunContent {
    /// Plain-text projection of this item.
    pub fn text(&self) -> &str {
        match self {
            RunContent::Text(s) => s,
            RunContent::Tab | RunContent::AbsoluteTab => "\t",
            RunContent::Break(BreakType::TextWrapping) => "\n",
            RunContent::Break(_) => "",
            RunContent::CarriageReturn => "\n",
            RunContent::NoBreakHyphen => "-",
            RunContent::Drawing
            | RunContent::RenderedPageBreak
            | RunContent::CommentReference(_)
            | RunContent::FootnoteReference(_)
            | RunContent::FootnoteRef => "",
        }
    }
}

/// Accumulates plain characters between special characters.
struct Encoder {
    items: Vec<RunContent>,
    pending: String,
}

impl Encoder {
    fn push_char(&mut self, ch: char) {
        match ch {
            '\t' => {
                self.flush();
                self.items.push(RunContent::Tab);
            },
            '\n' | '\r' => {
                self.flush();
                self.items.push(RunContent::Break(BreakType::TextWrapping));
            },
            _ => self.pending.push(ch),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.items.push(RunContent::Text(std::mem::take(&mut self.pending)));
        }
    }
}

/// Translate `text` into run content.
///
/// Runs of ordinary characters become one [`RunContent::Text`]; each tab
/// becomes [`RunContent::Tab`] and each `\n` or `\r` a text-wrapping break.
pub fn encode(text: &str) -> Vec<RunContent> {
    let mut encoder = Encoder {
        items: Vec::new(),
        pending: String::new(),
    };
    for ch in text.chars() {
        encoder.push_char(ch);
    }
    encoder.flush();
    encoder.items
}

/// Concatenate the text projection of each item in order.
pub fn decode(items: &[RunContent]) -> String {
    items.iter().map(RunContent::text).collect()
}

/// Whether a text chunk needs `xml:space="preserve"` to keep its whitespace.
#[inline]
pub fn needs_preserve(chunk: &str) -> bool {
    chunk.trim().len() < chunk.len()
}

/// Read the inner content of run `r` in document order.
///
/// Elements that have no run-content meaning (`w:rPr`, unmodeled tags) are
/// skipped.
pub fn read_run_content(tree: &XmlTree, r: NodeId) -> Result<Vec<RunContent>> {
    let mut items = Vec::with_capacity(tree.children(r).len());
    for child in tree.children(r) {
        let item = match tree.tag(*child) {
            Some(Tag::T) => RunContent::Text(tree.text(*child)),
            Some(Tag::Tab) => RunContent::Tab,
            Some(Tag::PTab) => RunContent::AbsoluteTab,
            Some(Tag::Br) => {
                let kind = tree.get_str(*child, "w:type")?.unwrap_or_default();
                RunContent::Break(BreakType::from_xml(&kind))
            },
            Some(Tag::Cr) => RunContent::CarriageReturn,
            Some(Tag::NoBreakHyphen) => RunContent::NoBreakHyphen,
            Some(Tag::Drawing) => RunContent::Drawing,
            Some(Tag::LastRenderedPageBreak) => RunContent::RenderedPageBreak,
            Some(Tag::CommentReference) => RunContent::CommentReference(annotation_id(tree, *child)?),
            Some(Tag::FootnoteReference) => {
                RunContent::FootnoteReference(annotation_id(tree, *child)?)
            },
            Some(Tag::FootnoteRef) => RunContent::FootnoteRef,
            _ => continue,
        };
        items.push(item);
    }
    Ok(items)
}

/// Text of run `r`.
pub fn run_text(tree: &XmlTree, r: NodeId) -> Result<String> {
    Ok(decode(&read_run_content(tree, r)?))
}

/// Append `items` to run `r` through ordered insertion.
///
/// Text chunks with leading or trailing whitespace are marked
/// `xml:space="preserve"`.
pub fn append_run_content(tree: &mut XmlTree, r: NodeId, items: &[RunContent]) -> Result<SmallVec<[NodeId; 4]>> {
    let mut added = SmallVec::new();
    for item in items {
        let node = match item {
            RunContent::Text(s) => {
                let t = tree.add_child(r, Tag::T)?;
                tree.set_text(t, s);
                if needs_preserve(s) {
                    tree.set_attribute(t, "xml:space", Some("preserve".into()))?;
                }
                t
            },
            RunContent::Tab => tree.add_child(r, Tag::Tab)?,
            RunContent::AbsoluteTab => tree.add_child(r, Tag::PTab)?,
            RunContent::Break(kind) => {
                let br = tree.add_child(r, Tag::Br)?;
                if *kind != BreakType::TextWrapping {
                    tree.set_attribute(br, "w:type", Some(kind.as_str().into()))?;
                }
                br
            },
            RunContent::CarriageReturn => tree.add_child(r, Tag::Cr)?,
            RunContent::NoBreakHyphen => tree.add_child(r, Tag::NoBreakHyphen)?,
            RunContent::Drawing => tree.add_child(r, Tag::Drawing)?,
            RunContent::RenderedPageBreak => tree.add_child(r, Tag::LastRenderedPageBreak)?,
            RunContent::CommentReference(id) => {
                let node = tree.add_child(r, Tag::CommentReference)?;
                tree.set_attribute(node, "w:id", Some((*id).into()))?;
                node
            },
            RunContent::FootnoteReference(id) => {
                let node = tree.add_child(r, Tag::FootnoteReference)?;
                tree.set_attribute(node, "w:id", Some((*id).into()))?;
                node
            },
            RunContent::FootnoteRef => tree.add_child(r, Tag::FootnoteRef)?,
        };
        added.push(node);
    }
    Ok(added)
}

/// Replace the text of run `r`, keeping its `w:rPr`.
///
/// Every other inner-content item, including reference markers, is removed.
pub fn set_run_text(tree: &mut XmlTree, r: NodeId, text: &str) -> Result<()> {
    clear_run_content(tree, r);
    append_run_content(tree, r, &encode(text))?;
    Ok(())
}

/// Remove all run inner content except `w:rPr`.
pub fn clear_run_content(tree: &mut XmlTree, r: NodeId) {
    tree.clear_children_except(r, &[Tag::RPr]);
}

pub(crate) fn annotation_id(tree: &XmlTree, node: NodeId) -> Result<i32> {
    let id = tree.get_int(node, "w:id")?;
    i32::try_from(id).map_err(|_| {
        crate::ooxml::error::OoxmlError::schema(
            tree.display_name(node),
            format!("id {} is out of range", id),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(tree: &mut XmlTree) -> NodeId {
        tree.new_element(Tag::R)
    }

    #[test]
    fn test_encode_splits_on_tabs_and_newlines() {
        assert_eq!(
            encode("a\tb\nc\rd"),
            vec![
                RunContent::Text("a".into()),
                RunContent::Tab,
                RunContent::Text("b".into()),
                RunContent::Break(BreakType::TextWrapping),
                RunContent::Text("c".into()),
                RunContent::Break(BreakType::TextWrapping),
                RunContent::Text("d".into()),
            ]
        );
    }

    #[test]
    fn test_encode_emits_no_empty_chunks() {
        assert_eq!(encode(""), vec![]);
        assert_eq!(encode("\t\t"), vec![RunContent::Tab, RunContent::Tab]);
    }

    #[test]
    fn test_decode_projections() {
        let items = vec![
            RunContent::Text("x".into()),
            RunContent::AbsoluteTab,
            RunContent::CarriageReturn,
            RunContent::NoBreakHyphen,
            RunContent::Break(BreakType::Page),
            RunContent::Drawing,
            RunContent::CommentReference(4),
            RunContent::FootnoteRef,
            RunContent::Text("y".into()),
        ];
        assert_eq!(decode(&items), "x\t\n-y");
    }

    #[test]
    fn test_carriage_return_is_lossy() {
        // `\r` and `\n` both come back as `\n`.
        assert_eq!(decode(&encode("a\rb")), "a\nb");
    }

    #[test]
    fn test_set_run_text_marks_whitespace_chunks() {
        let mut tree = XmlTree::new();
        let r = run(&mut tree);
        set_run_text(&mut tree, r, " padded\tplain").unwrap();
        let ts: Vec<_> = tree.children_tagged(r, Tag::T).collect();
        assert_eq!(ts.len(), 2);
        assert_eq!(tree.attribute(ts[0], "xml:space"), Some("preserve"));
        assert_eq!(tree.attribute(ts[1], "xml:space"), None);
        assert_eq!(run_text(&tree, r).unwrap(), " padded\tplain");
    }

    #[test]
    fn test_set_run_text_keeps_properties() {
        let mut tree = XmlTree::new();
        let r = run(&mut tree);
        let rpr = tree.get_or_add_child(r, Tag::RPr).unwrap();
        set_run_text(&mut tree, r, "one").unwrap();
        set_run_text(&mut tree, r, "two").unwrap();
        assert_eq!(tree.children(r).len(), 2);
        assert_eq!(tree.children(r)[0], rpr);
        assert_eq!(run_text(&tree, r).unwrap(), "two");
    }

    #[test]
    fn test_read_parsed_run_content() {
        let mut tree = XmlTree::new();
        let r = tree
            .parse(
                br#"<w:r><w:rPr/><w:t>a</w:t><w:br w:type="page"/><w:br/><w:noBreakHyphen/><w:commentReference w:id="2"/></w:r>"#,
            )
            .unwrap();
        let items = read_run_content(&tree, r).unwrap();
        assert_eq!(
            items,
            vec![
                RunContent::Text("a".into()),
                RunContent::Break(BreakType::Page),
                RunContent::Break(BreakType::TextWrapping),
                RunContent::NoBreakHyphen,
                RunContent::CommentReference(2),
            ]
        );
        assert_eq!(decode(&items), "a\n-");
    }

    #[test]
    fn test_malformed_reference_id_is_violation() {
        let mut tree = XmlTree::new();
        let r = tree
            .parse(br#"<w:r><w:footnoteReference w:id="x"/></w:r>"#)
            .unwrap();
        assert!(read_run_content(&tree, r).is_err());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(s in "[a-z \t\n]*") {
            prop_assert_eq!(decode(&encode(&s)), s);
        }

        #[test]
        fn prop_text_survives_the_tree(s in "[a-z \t\n]*") {
            let mut tree = XmlTree::new();
            let r = tree.new_element(Tag::R);
            set_run_text(&mut tree, r, &s).unwrap();
            prop_assert_eq!(run_text(&tree, r).unwrap(), s);
        }
    }
}
