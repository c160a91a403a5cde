/// Static schema fragments for the modeled WordprocessingML elements.
///
/// Each element declares its attributes (name, codec, presence) and its
/// permitted children (tag, cardinality, successor set). The successor set of
/// a child is the set of sibling tags that must come *after* it; ordered
/// insertion places a new child before the first existing sibling in that set.
use super::simpletypes::SimpleType;
use super::tag::Tag;

/// Whether an attribute must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence is a schema violation.
    Required,
    /// Absence is allowed; reads fall back to `default` when declared.
    Optional { default: Option<&'static str> },
}

/// Declared attribute of an element.
#[derive(Debug)]
pub struct AttributeSpec {
    /// Qualified attribute name, e.g. `"w:id"`.
    pub name: &'static str,
    /// Value codec.
    pub ty: SimpleType,
    /// Presence rule.
    pub presence: Presence,
}

/// How many instances of a child may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ZeroOrOne,
    ZeroOrMore,
}

/// Tags that must follow a child.
#[derive(Debug, Clone, Copy)]
pub enum Successors {
    /// Insert before the first sibling with one of these tags, else append.
    Tags(&'static [Tag]),
    /// The child leads its parent: every other sibling follows it.
    All,
}

impl Successors {
    /// Whether a sibling tagged `tag` must come after the new child.
    #[inline]
    pub fn contains(&self, tag: Tag) -> bool {
        match self {
            Successors::Tags(tags) => tags.contains(&tag),
            Successors::All => true,
        }
    }
}

/// Declared child of an element.
#[derive(Debug)]
pub struct ChildSpec {
    pub tag: Tag,
    pub cardinality: Cardinality,
    pub successors: Successors,
}

/// Schema fragment for one element.
#[derive(Debug)]
pub struct ElementSpec {
    pub tag: Tag,
    pub attributes: &'static [AttributeSpec],
    pub children: &'static [ChildSpec],
}

impl ElementSpec {
    /// Declared attribute named `name`.
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Declared child tagged `tag`.
    pub fn child(&self, tag: Tag) -> Option<&'static ChildSpec> {
        self.children.iter().find(|c| c.tag == tag)
    }
}

const fn required(name: &'static str, ty: SimpleType) -> AttributeSpec {
    AttributeSpec {
        name,
        ty,
        presence: Presence::Required,
    }
}

const fn optional(name: &'static str, ty: SimpleType, default: Option<&'static str>) -> AttributeSpec {
    AttributeSpec {
        name,
        ty,
        presence: Presence::Optional { default },
    }
}

const fn zero_or_one(tag: Tag, successors: Successors) -> ChildSpec {
    ChildSpec {
        tag,
        cardinality: Cardinality::ZeroOrOne,
        successors,
    }
}

const fn zero_or_more(tag: Tag, successors: Successors) -> ChildSpec {
    ChildSpec {
        tag,
        cardinality: Cardinality::ZeroOrMore,
        successors,
    }
}

const APPEND: Successors = Successors::Tags(&[]);

const ID_ONLY: &[AttributeSpec] = &[required("w:id", SimpleType::DecimalNumber)];
const VAL_ONLY: &[AttributeSpec] = &[required("w:val", SimpleType::String)];

/// Run inner-content tags, in no particular order among themselves.
pub const RUN_CONTENT: &[Tag] = &[
    Tag::T,
    Tag::Tab,
    Tag::PTab,
    Tag::Br,
    Tag::Cr,
    Tag::NoBreakHyphen,
    Tag::Drawing,
    Tag::LastRenderedPageBreak,
    Tag::CommentReference,
    Tag::FootnoteReference,
    Tag::FootnoteRef,
];

static DOCUMENT: ElementSpec = ElementSpec {
    tag: Tag::Document,
    attributes: &[],
    children: &[zero_or_one(Tag::Body, APPEND)],
};

static BODY: ElementSpec = ElementSpec {
    tag: Tag::Body,
    attributes: &[],
    children: &[
        zero_or_more(Tag::P, Successors::Tags(&[Tag::SectPr])),
        zero_or_one(Tag::SectPr, APPEND),
    ],
};

static P: ElementSpec = ElementSpec {
    tag: Tag::P,
    attributes: &[],
    children: &[
        zero_or_one(Tag::PPr, Successors::All),
        zero_or_more(Tag::R, APPEND),
        zero_or_more(Tag::CommentRangeStart, APPEND),
        zero_or_more(Tag::CommentRangeEnd, APPEND),
    ],
};

static PPR: ElementSpec = ElementSpec {
    tag: Tag::PPr,
    attributes: &[],
    children: &[zero_or_one(Tag::PStyle, Successors::All)],
};

static R: ElementSpec = ElementSpec {
    tag: Tag::R,
    attributes: &[],
    children: &[
        zero_or_one(Tag::RPr, Successors::All),
        zero_or_more(Tag::T, APPEND),
        zero_or_more(Tag::Tab, APPEND),
        zero_or_more(Tag::PTab, APPEND),
        zero_or_more(Tag::Br, APPEND),
        zero_or_more(Tag::Cr, APPEND),
        zero_or_more(Tag::NoBreakHyphen, APPEND),
        zero_or_more(Tag::Drawing, APPEND),
        zero_or_more(Tag::LastRenderedPageBreak, APPEND),
        zero_or_more(Tag::CommentReference, APPEND),
        zero_or_more(Tag::FootnoteReference, APPEND),
        zero_or_more(Tag::FootnoteRef, APPEND),
    ],
};

static RPR: ElementSpec = ElementSpec {
    tag: Tag::RPr,
    attributes: &[],
    children: &[zero_or_one(Tag::RStyle, Successors::All)],
};

static T: ElementSpec = ElementSpec {
    tag: Tag::T,
    attributes: &[optional("xml:space", SimpleType::XmlSpace, None)],
    children: &[],
};

static BR: ElementSpec = ElementSpec {
    tag: Tag::Br,
    attributes: &[
        optional("w:type", SimpleType::BrType, Some("textWrapping")),
        optional("w:clear", SimpleType::BrClear, None),
    ],
    children: &[],
};

static COMMENTS: ElementSpec = ElementSpec {
    tag: Tag::Comments,
    attributes: &[],
    children: &[zero_or_more(Tag::Comment, APPEND)],
};

static COMMENT: ElementSpec = ElementSpec {
    tag: Tag::Comment,
    attributes: &[
        required("w:id", SimpleType::DecimalNumber),
        required("w:author", SimpleType::String),
        required("w:initials", SimpleType::String),
        required("w:date", SimpleType::String),
    ],
    children: &[zero_or_one(Tag::P, APPEND)],
};

static FOOTNOTES: ElementSpec = ElementSpec {
    tag: Tag::Footnotes,
    attributes: &[],
    children: &[zero_or_more(Tag::Footnote, APPEND)],
};

static FOOTNOTE: ElementSpec = ElementSpec {
    tag: Tag::Footnote,
    attributes: &[
        required("w:id", SimpleType::DecimalNumber),
        optional("w:type", SimpleType::FtnEdn, Some("normal")),
    ],
    children: &[zero_or_one(Tag::P, APPEND)],
};

macro_rules! leaf {
    ($name:ident, $tag:expr, $attrs:expr) => {
        static $name: ElementSpec = ElementSpec {
            tag: $tag,
            attributes: $attrs,
            children: &[],
        };
    };
}

leaf!(SECT_PR, Tag::SectPr, &[]);
leaf!(P_STYLE, Tag::PStyle, VAL_ONLY);
leaf!(R_STYLE, Tag::RStyle, VAL_ONLY);
leaf!(TAB, Tag::Tab, &[]);
leaf!(PTAB, Tag::PTab, &[]);
leaf!(CR, Tag::Cr, &[]);
leaf!(NO_BREAK_HYPHEN, Tag::NoBreakHyphen, &[]);
leaf!(DRAWING, Tag::Drawing, &[]);
leaf!(LAST_RENDERED_PAGE_BREAK, Tag::LastRenderedPageBreak, &[]);
leaf!(COMMENT_RANGE_START, Tag::CommentRangeStart, ID_ONLY);
leaf!(COMMENT_RANGE_END, Tag::CommentRangeEnd, ID_ONLY);
leaf!(COMMENT_REFERENCE, Tag::CommentReference, ID_ONLY);
leaf!(FOOTNOTE_REFERENCE, Tag::FootnoteReference, ID_ONLY);
leaf!(FOOTNOTE_REF, Tag::FootnoteRef, &[]);
leaf!(UNKNOWN, Tag::Unknown, &[]);

/// Schema fragment for `tag`.
///
/// [`Tag::Unknown`] maps to an empty fragment: nothing can be read or
/// inserted through the schema layer on an unmodeled element.
pub fn spec_for(tag: Tag) -> &'static ElementSpec {
    match tag {
        Tag::Document => &DOCUMENT,
        Tag::Body => &BODY,
        Tag::SectPr => &SECT_PR,
        Tag::P => &P,
        Tag::PPr => &PPR,
        Tag::PStyle => &P_STYLE,
        Tag::R => &R,
        Tag::RPr => &RPR,
        Tag::RStyle => &R_STYLE,
        Tag::T => &T,
        Tag::Tab => &TAB,
        Tag::PTab => &PTAB,
        Tag::Br => &BR,
        Tag::Cr => &CR,
        Tag::NoBreakHyphen => &NO_BREAK_HYPHEN,
        Tag::Drawing => &DRAWING,
        Tag::LastRenderedPageBreak => &LAST_RENDERED_PAGE_BREAK,
        Tag::CommentRangeStart => &COMMENT_RANGE_START,
        Tag::CommentRangeEnd => &COMMENT_RANGE_END,
        Tag::CommentReference => &COMMENT_REFERENCE,
        Tag::Comments => &COMMENTS,
        Tag::Comment => &COMMENT,
        Tag::Footnotes => &FOOTNOTES,
        Tag::Footnote => &FOOTNOTE,
        Tag::FootnoteReference => &FOOTNOTE_REFERENCE,
        Tag::FootnoteRef => &FOOTNOTE_REF,
        Tag::Unknown => &UNKNOWN,
    }
}
