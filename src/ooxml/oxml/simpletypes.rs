/// Simple-type codecs for attribute values.
///
/// Each declared attribute names one of these codecs. Values are parsed from
/// and serialized to their XML token form; anything the codec rejects is a
/// schema violation at the point of access.
use serde::Serialize;

/// Parsed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypedValue {
    /// Integer value (`ST_DecimalNumber`).
    Int(i64),
    /// String value (`ST_String` and enumerations).
    Str(String),
}

impl TypedValue {
    /// Integer payload, if this is an [`TypedValue::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if this is a [`TypedValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Int(v)
    }
}

impl From<i32> for TypedValue {
    fn from(v: i32) -> Self {
        TypedValue::Int(v as i64)
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::Str(v.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::Str(v)
    }
}

/// Attribute codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleType {
    /// Signed decimal integer (`ST_DecimalNumber`).
    DecimalNumber,
    /// Arbitrary string (`ST_String`).
    String,
    /// Break type (`ST_BrType`).
    BrType,
    /// Break clear location (`ST_BrClear`).
    BrClear,
    /// Footnote kind (`ST_FtnEdn`).
    FtnEdn,
    /// `xml:space` value.
    XmlSpace,
}

const BR_TYPES: &[&str] = &["page", "column", "textWrapping"];
const BR_CLEARS: &[&str] = &["none", "left", "right", "all"];
const FTN_EDN: &[&str] = &[
    "normal",
    "separator",
    "continuationSeparator",
    "continuationNotice",
];
const XML_SPACE: &[&str] = &["default", "preserve"];

impl SimpleType {
    /// Parse an XML token into a typed value.
    ///
    /// The error string describes why the token was rejected.
    pub fn parse(self, raw: &str) -> Result<TypedValue, String> {
        match self {
            SimpleType::DecimalNumber => atoi_simd::parse::<i64, false, false>(raw.trim().as_bytes())
                .map(TypedValue::Int)
                .map_err(|_| format!("'{}' is not a decimal number", raw)),
            SimpleType::String => Ok(TypedValue::Str(raw.to_string())),
            SimpleType::BrType => Self::enumerated(raw, BR_TYPES),
            SimpleType::BrClear => Self::enumerated(raw, BR_CLEARS),
            SimpleType::FtnEdn => Self::enumerated(raw, FTN_EDN),
            SimpleType::XmlSpace => Self::enumerated(raw, XML_SPACE),
        }
    }

    /// Serialize a typed value into its XML token.
    pub fn serialize(self, value: &TypedValue) -> Result<String, String> {
        match (self, value) {
            (SimpleType::DecimalNumber, TypedValue::Int(v)) => {
                let mut buf = itoa::Buffer::new();
                Ok(buf.format(*v).to_string())
            },
            (SimpleType::String, TypedValue::Str(s)) => Ok(s.clone()),
            (SimpleType::BrType, TypedValue::Str(s)) => Self::checked(s, BR_TYPES),
            (SimpleType::BrClear, TypedValue::Str(s)) => Self::checked(s, BR_CLEARS),
            (SimpleType::FtnEdn, TypedValue::Str(s)) => Self::checked(s, FTN_EDN),
            (SimpleType::XmlSpace, TypedValue::Str(s)) => Self::checked(s, XML_SPACE),
            (ty, value) => Err(format!("{:?} cannot hold {:?}", ty, value)),
        }
    }

    fn enumerated(raw: &str, allowed: &[&str]) -> Result<TypedValue, String> {
        if allowed.contains(&raw) {
            Ok(TypedValue::Str(raw.to_string()))
        } else {
            Err(format!("'{}' is not one of {:?}", raw, allowed))
        }
    }

    fn checked(s: &str, allowed: &[&str]) -> Result<String, String> {
        if allowed.contains(&s) {
            Ok(s.to_string())
        } else {
            Err(format!("'{}' is not one of {:?}", s, allowed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_number() {
        assert_eq!(SimpleType::DecimalNumber.parse("42"), Ok(TypedValue::Int(42)));
        assert_eq!(SimpleType::DecimalNumber.parse("-1"), Ok(TypedValue::Int(-1)));
        assert!(SimpleType::DecimalNumber.parse("4x").is_err());
        assert!(SimpleType::DecimalNumber.parse("").is_err());
        assert_eq!(
            SimpleType::DecimalNumber.serialize(&TypedValue::Int(-7)).unwrap(),
            "-7"
        );
    }

    #[test]
    fn test_enumerations_reject_unknown_tokens() {
        assert!(SimpleType::BrType.parse("page").is_ok());
        assert!(SimpleType::BrType.parse("paragraph").is_err());
        assert!(SimpleType::XmlSpace.serialize(&"collapse".into()).is_err());
    }

    #[test]
    fn test_mismatched_value_kind() {
        assert!(SimpleType::DecimalNumber.serialize(&"1".into()).is_err());
        assert!(SimpleType::String.serialize(&TypedValue::Int(1)).is_err());
    }
}
