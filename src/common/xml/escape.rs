use aho_corasick::AhoCorasick;
use memchr::{memchr, memchr3};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Character data only needs `&`, `<` and `>` replaced.
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "\t", "\n", "\r"])
        .expect("Failed to build XML attribute escaper")
});

/// Escape character data for use between tags.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use marginalia::common::xml::escape_text;
/// assert_eq!(escape_text("a & b"), "a &amp; b");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
#[inline]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'<', b'>', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"]))
}

/// Escape a value for use inside a double-quoted attribute.
///
/// Whitespace control characters are written as character references so
/// attribute-value normalization does not fold them into spaces.
///
/// # Examples
///
/// ```
/// use marginalia::common::xml::escape_attr;
/// assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
/// assert_eq!(escape_attr("a\tb"), "a&#9;b");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let needs_escape = memchr3(b'&', b'<', b'>', bytes).is_some()
        || memchr3(b'"', b'\t', b'\n', bytes).is_some()
        || memchr(b'\r', bytes).is_some();
    if !needs_escape {
        return Cow::Borrowed(s);
    }
    Cow::Owned(ATTR_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&#9;", "&#10;", "&#13;"],
    ))
}

/// Resolve the name of an entity or character reference (the part between
/// `&` and `;`) to the text it stands for.
///
/// Returns `None` for names that are neither predefined entities nor valid
/// character references.
pub fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok()?,
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_borrows_when_clean() {
        assert!(matches!(escape_text("Hello world!"), Cow::Borrowed(_)));
        assert_eq!(escape_text("<w:t>"), "&lt;w:t&gt;");
    }

    #[test]
    fn test_escape_attr_quotes_and_whitespace() {
        assert_eq!(escape_attr("R&D \"team\""), "R&amp;D &quot;team&quot;");
        assert_eq!(escape_attr("line\nbreak"), "line&#10;break");
    }

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference("amp"), Some('&'));
        assert_eq!(resolve_reference("#65"), Some('A'));
        assert_eq!(resolve_reference("#x263A"), Some('\u{263A}'));
        assert_eq!(resolve_reference("nbsp"), None);
        assert_eq!(resolve_reference("#xZZ"), None);
    }
}
