//! Domain types shared by the tokenizer, code generator, and renderer.
//!
//! All types are serializable via serde so a compiled template can be dumped
//! and inspected without re-running the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opening delimiter of an expression tag.
pub const OPEN: &str = "{{";
/// Closing delimiter of an expression tag.
pub const CLOSE: &str = "}}";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A validated bare identifier naming a context field.
///
/// Always matches `[A-Za-z_][A-Za-z0-9_]*`; construct with [`FieldName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Returns `Some` when `s` is a bare identifier, `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        is_identifier(s).then(|| Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_identifier(&s) {
            Ok(Self(s))
        } else {
            Err(format!("'{s}' is not a bare identifier"))
        }
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Classification of a template segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Literal,
    Expression,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Literal => write!(f, "literal"),
            TokenKind::Expression => write!(f, "expression"),
        }
    }
}

/// A raw slice of the template produced by the tokenizer.
///
/// Expression tokens keep their `{{` / `}}` delimiters in `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token's first character in the template.
    pub offset: usize,
}

impl Token {
    pub fn literal(text: impl Into<String>, offset: usize) -> Self {
        Self { kind: TokenKind::Literal, text: text.into(), offset }
    }

    pub fn expression(text: impl Into<String>, offset: usize) -> Self {
        Self { kind: TokenKind::Expression, text: text.into(), offset }
    }

    /// Text between the delimiters of an expression token, untrimmed.
    ///
    /// Returns `None` for literal tokens.
    pub fn inner(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Literal => None,
            TokenKind::Expression => self
                .text
                .strip_prefix(OPEN)
                .and_then(|s| s.strip_suffix(CLOSE)),
        }
    }
}

// ---------------------------------------------------------------------------
// Compiled parts
// ---------------------------------------------------------------------------

/// One instruction of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Part {
    /// Copied to the output verbatim.
    Literal(String),
    /// Replaced by the display string of the named context field.
    Field(FieldName),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("years2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2years"));
        assert!(!is_identifier("first name"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier("naïve"));
    }

    #[test]
    fn field_name_rejects_invalid_on_deserialize() {
        let ok: FieldName = serde_json::from_str("\"name\"").expect("valid identifier");
        assert_eq!(ok.as_str(), "name");
        assert!(serde_json::from_str::<FieldName>("\"1 + 1\"").is_err());
    }

    #[test]
    fn token_inner_strips_delimiters() {
        let tok = Token::expression("{{ name }}", 0);
        assert_eq!(tok.inner(), Some(" name "));
        assert_eq!(Token::literal("{{ name }}", 0).inner(), None);
    }

    #[test]
    fn part_json_shape() {
        let part = Part::Field(FieldName::parse("name").unwrap());
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(json, r#"{"kind":"field","value":"name"}"#);
    }
}
