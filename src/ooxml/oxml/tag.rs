/// Closed set of WordprocessingML tags known to the schema layer.
///
/// Every element node in the arena carries one of these. Elements read from a
/// part that the schema layer does not model are kept as [`Tag::Unknown`]
/// with their qualified name stored on the node, so they survive a round trip.
use phf::phf_map;
use serde::Serialize;

/// A WordprocessingML element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    /// `w:document`
    Document,
    /// `w:body`
    Body,
    /// `w:sectPr`
    SectPr,
    /// `w:p`
    P,
    /// `w:pPr`
    PPr,
    /// `w:pStyle`
    PStyle,
    /// `w:r`
    R,
    /// `w:rPr`
    RPr,
    /// `w:rStyle`
    RStyle,
    /// `w:t`
    T,
    /// `w:tab`
    Tab,
    /// `w:ptab`
    PTab,
    /// `w:br`
    Br,
    /// `w:cr`
    Cr,
    /// `w:noBreakHyphen`
    NoBreakHyphen,
    /// `w:drawing`
    Drawing,
    /// `w:lastRenderedPageBreak`
    LastRenderedPageBreak,
    /// `w:commentRangeStart`
    CommentRangeStart,
    /// `w:commentRangeEnd`
    CommentRangeEnd,
    /// `w:commentReference`
    CommentReference,
    /// `w:comments`
    Comments,
    /// `w:comment`
    Comment,
    /// `w:footnotes`
    Footnotes,
    /// `w:footnote`
    Footnote,
    /// `w:footnoteReference`
    FootnoteReference,
    /// `w:footnoteRef`
    FootnoteRef,
    /// Any element the schema layer does not model.
    Unknown,
}

static TAGS: phf::Map<&'static str, Tag> = phf_map! {
    "w:document" => Tag::Document,
    "w:body" => Tag::Body,
    "w:sectPr" => Tag::SectPr,
    "w:p" => Tag::P,
    "w:pPr" => Tag::PPr,
    "w:pStyle" => Tag::PStyle,
    "w:r" => Tag::R,
    "w:rPr" => Tag::RPr,
    "w:rStyle" => Tag::RStyle,
    "w:t" => Tag::T,
    "w:tab" => Tag::Tab,
    "w:ptab" => Tag::PTab,
    "w:br" => Tag::Br,
    "w:cr" => Tag::Cr,
    "w:noBreakHyphen" => Tag::NoBreakHyphen,
    "w:drawing" => Tag::Drawing,
    "w:lastRenderedPageBreak" => Tag::LastRenderedPageBreak,
    "w:commentRangeStart" => Tag::CommentRangeStart,
    "w:commentRangeEnd" => Tag::CommentRangeEnd,
    "w:commentReference" => Tag::CommentReference,
    "w:comments" => Tag::Comments,
    "w:comment" => Tag::Comment,
    "w:footnotes" => Tag::Footnotes,
    "w:footnote" => Tag::Footnote,
    "w:footnoteReference" => Tag::FootnoteReference,
    "w:footnoteRef" => Tag::FootnoteRef,
};

impl Tag {
    /// Look up the tag for a qualified name such as `"w:p"`.
    #[inline]
    pub fn from_qname(qname: &str) -> Tag {
        TAGS.get(qname).copied().unwrap_or(Tag::Unknown)
    }

    /// Qualified name of this tag, `None` for [`Tag::Unknown`].
    pub fn qname(self) -> Option<&'static str> {
        let name = match self {
            Tag::Document => "w:document",
            Tag::Body => "w:body",
            Tag::SectPr => "w:sectPr",
            Tag::P => "w:p",
            Tag::PPr => "w:pPr",
            Tag::PStyle => "w:pStyle",
            Tag::R => "w:r",
            Tag::RPr => "w:rPr",
            Tag::RStyle => "w:rStyle",
            Tag::T => "w:t",
            Tag::Tab => "w:tab",
            Tag::PTab => "w:ptab",
            Tag::Br => "w:br",
            Tag::Cr => "w:cr",
            Tag::NoBreakHyphen => "w:noBreakHyphen",
            Tag::Drawing => "w:drawing",
            Tag::LastRenderedPageBreak => "w:lastRenderedPageBreak",
            Tag::CommentRangeStart => "w:commentRangeStart",
            Tag::CommentRangeEnd => "w:commentRangeEnd",
            Tag::CommentReference => "w:commentReference",
            Tag::Comments => "w:comments",
            Tag::Comment => "w:comment",
            Tag::Footnotes => "w:footnotes",
            Tag::Footnote => "w:footnote",
            Tag::FootnoteReference => "w:footnoteReference",
            Tag::FootnoteRef => "w:footnoteRef",
            Tag::Unknown => return None,
        };
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trips_qname() {
        for tag in [Tag::P, Tag::CommentRangeStart, Tag::FootnoteRef, Tag::LastRenderedPageBreak] {
            let qname = tag.qname().unwrap();
            assert_eq!(Tag::from_qname(qname), tag);
        }
    }

    #[test]
    fn test_unmodeled_names_are_unknown() {
        assert_eq!(Tag::from_qname("w:tbl"), Tag::Unknown);
        assert_eq!(Tag::from_qname("p"), Tag::Unknown);
        assert_eq!(Tag::Unknown.qname(), None);
    }
}
