//! Enum and type-string primitives.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::Serialize;

/// Semantic kind of a registry enum constant.
///
/// The kind is an explicit discriminant selected at parse time from the
/// enclosing `<enums>` block, never inferred later from attribute presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EnumKind {
    /// GL_TRUE / GL_FALSE.
    Boolean,
    /// Member of a bitmask block; combined as flags.
    Bitfield,
    /// Plain symbolic constant.
    Enum,
    /// Special number with a concrete scalar type (e.g. GLuint64).
    Special(String),
}

impl EnumKind {
    /// The C scalar type constants of this kind are emitted as.
    pub fn scalar_type(&self) -> &str {
        match self {
            EnumKind::Boolean => "GLboolean",
            EnumKind::Bitfield => "GLbitfield",
            EnumKind::Enum => "GLenum",
            EnumKind::Special(ty) => ty,
        }
    }

    pub fn is_bitfield(&self) -> bool {
        matches!(self, EnumKind::Bitfield)
    }
}

/// An enum constant value: the literal as written in the registry plus its
/// parsed numeric form used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumValue {
    /// The literal exactly as it appears in the registry (may be hex).
    pub literal: String,
    /// Parsed numeric value; i128 covers the full u64 range and negatives.
    pub number: i128,
}

impl EnumValue {
    pub fn new(literal: impl Into<String>, number: i128) -> Self {
        Self {
            literal: literal.into(),
            number,
        }
    }
}

impl FromStr for EnumValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let number = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            i128::from_str_radix(hex, 16)
        } else {
            digits.parse::<i128>()
        }
        .map_err(|_| format!("invalid enum value literal '{}'", s))?;

        Ok(Self {
            literal: s.to_string(),
            number: if negative { -number } else { number },
        })
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// One registry enum constant.
#[derive(Debug, Clone, Serialize)]
pub struct Enum {
    pub name: String,
    pub value: EnumValue,
    pub kind: EnumKind,
    /// Name of the enum this one aliases, if any.
    pub alias: Option<String>,
    /// Group tag from the enclosing bitmask block, if any.
    pub group: Option<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>, value: EnumValue, kind: EnumKind) -> Self {
        Self {
            name: name.into(),
            value,
            kind,
            alias: None,
            group: None,
        }
    }
}

impl PartialEq for Enum {
    fn eq(&self, other: &Self) -> bool {
        self.value.number == other.value.number && self.name == other.name
    }
}

impl Eq for Enum {}

impl PartialOrd for Enum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Enum {
    /// Primary key is the numeric value, secondary key is the name.
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .number
            .cmp(&other.value.number)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// A parameter or return type string with its struct marker.
///
/// Registry prototypes may carry a C `struct ` prefix; the parser strips it
/// and records the marker instead of keeping a decorated type string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDesc {
    pub text: String,
    pub is_struct: bool,
}

impl TypeDesc {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_struct: false,
        }
    }

    /// Parse a raw prototype type string, stripping a `struct ` prefix.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.strip_prefix("struct ") {
            Some(rest) => Self {
                text: rest.trim().to_string(),
                is_struct: true,
            },
            None => Self {
                text: trimmed.to_string(),
                is_struct: false,
            },
        }
    }

    pub fn is_void(&self) -> bool {
        !self.is_struct && self.text == "void"
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_struct {
            write!(f, "struct {}", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_value_decimal() {
        let v: EnumValue = "1".parse().unwrap();
        assert_eq!(v.number, 1);
        assert_eq!(v.literal, "1");
    }

    #[test]
    fn test_enum_value_hex() {
        let v: EnumValue = "0x1F".parse().unwrap();
        assert_eq!(v.number, 0x1F);
        assert_eq!(v.to_string(), "0x1F");
    }

    #[test]
    fn test_enum_value_u64_max() {
        let v: EnumValue = "0xFFFFFFFFFFFFFFFF".parse().unwrap();
        assert_eq!(v.number, u64::MAX as i128);
    }

    #[test]
    fn test_enum_value_negative() {
        let v: EnumValue = "-2".parse().unwrap();
        assert_eq!(v.number, -2);
    }

    #[test]
    fn test_enum_value_invalid() {
        assert!("0xZZ".parse::<EnumValue>().is_err());
        assert!("".parse::<EnumValue>().is_err());
    }

    #[test]
    fn test_enum_ordering_by_value_then_name() {
        let a = Enum::new("GL_B", "0x1".parse().unwrap(), EnumKind::Enum);
        let b = Enum::new("GL_A", "0x2".parse().unwrap(), EnumKind::Enum);
        let c = Enum::new("GL_A", "0x1".parse().unwrap(), EnumKind::Enum);

        let mut v = vec![a.clone(), b.clone(), c.clone()];
        v.sort();
        assert_eq!(v, vec![c, a, b]);
    }

    #[test]
    fn test_kind_scalar_type() {
        assert_eq!(EnumKind::Boolean.scalar_type(), "GLboolean");
        assert_eq!(EnumKind::Bitfield.scalar_type(), "GLbitfield");
        assert_eq!(EnumKind::Enum.scalar_type(), "GLenum");
        assert_eq!(EnumKind::Special("GLuint64".into()).scalar_type(), "GLuint64");
    }

    #[test]
    fn test_type_desc_strips_struct_prefix() {
        let ty = TypeDesc::parse("struct _cl_context *");
        assert!(ty.is_struct);
        assert_eq!(ty.text, "_cl_context *");
        assert_eq!(ty.to_string(), "struct _cl_context *");
    }

    #[test]
    fn test_type_desc_plain() {
        let ty = TypeDesc::parse("const GLfloat *");
        assert!(!ty.is_struct);
        assert_eq!(ty.to_string(), "const GLfloat *");
    }

    #[test]
    fn test_type_desc_void() {
        assert!(TypeDesc::parse("void").is_void());
        assert!(!TypeDesc::parse("void *").is_void());
    }
}
