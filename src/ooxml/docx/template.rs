//! Skeleton payloads for parts created on demand.
//!
//! Each skeleton is the smallest valid markup for its part. The footnotes
//! skeleton carries the two separator placeholders Word expects, which also
//! seeds footnote id allocation so that the first real note gets id 1.

/// Empty main document with a single section definition.
pub const DOCUMENT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body><w:sectPr/></w:body>"#,
    r#"</w:document>"#
);

/// Comments part with no entries.
pub const COMMENTS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:comments xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#
);

/// Footnotes part holding only the separator (id -1) and continuation
/// separator (id 0) placeholders.
pub const FOOTNOTES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:footnotes xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>"#,
    r#"<w:footnote w:type="continuationSeparator" w:id="0"><w:p><w:r><w:continuationSeparator/></w:r></w:p></w:footnote>"#,
    r#"</w:footnotes>"#
);
