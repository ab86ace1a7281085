//! Code generator: lowers a token stream into a compiled parts list.
//!
//! Expression tags become plain field lookups; nothing is ever evaluated.

use std::fmt;

use crate::error::TemplateError;
use crate::types::{FieldName, Part, Token, TokenKind};

/// Lower `tokens` into an ordered list of [`Part`]s.
///
/// Fails on the first expression whose trimmed content is not a bare
/// identifier.
pub fn generate(tokens: &[Token]) -> Result<Vec<Part>, TemplateError> {
    tokens.iter().map(lower).collect()
}

fn lower(token: &Token) -> Result<Part, TemplateError> {
    match token.kind {
        TokenKind::Literal => Ok(Part::Literal(token.text.clone())),
        TokenKind::Expression => token
            .inner()
            .map(str::trim)
            .and_then(FieldName::parse)
            .map(Part::Field)
            .ok_or_else(|| TemplateError::MalformedExpression {
                expression: token.text.clone(),
                offset: token.offset,
            }),
    }
}

/// Concatenation-program view of a parts list, e.g. `"Hi, " + name + "!"`.
///
/// Purely diagnostic; the renderer never parses it back.
pub struct Program<'a>(pub &'a [Part]);

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "\"\"");
        }
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match part {
                Part::Literal(text) => write!(f, "{text:?}")?,
                Part::Field(name) => write!(f, "{name}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn field(name: &str) -> Part {
        Part::Field(FieldName::parse(name).unwrap())
    }

    #[test]
    fn literals_are_copied_verbatim() {
        let parts = generate(&tokenize("<b>\"quoted\"</b>\n")).unwrap();
        assert_eq!(parts, vec![Part::Literal("<b>\"quoted\"</b>\n".into())]);
    }

    #[test]
    fn whitespace_inside_tags_is_trimmed() {
        let parts = generate(&tokenize("{{name}}{{  name\t}}{{\n name \n}}")).unwrap();
        assert_eq!(parts, vec![field("name"), field("name"), field("name")]);
    }

    #[test]
    fn operators_are_malformed() {
        let err = generate(&tokenize("ok {{ 1 + 1 }}")).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MalformedExpression { expression: "{{ 1 + 1 }}".into(), offset: 3 }
        );
    }

    #[test]
    fn empty_and_blank_tags_are_malformed() {
        assert!(generate(&tokenize("{{}}")).is_err());
        assert!(generate(&tokenize("{{   }}")).is_err());
    }

    #[test]
    fn member_access_and_multiple_names_are_malformed() {
        assert!(generate(&tokenize("{{ user.name }}")).is_err());
        assert!(generate(&tokenize("{{ first last }}")).is_err());
        assert!(generate(&tokenize("{{{ name }}}")).is_err());
    }

    #[test]
    fn program_view_reads_like_concatenation() {
        let parts = generate(&tokenize("Hi, {{ name }}!")).unwrap();
        assert_eq!(Program(&parts).to_string(), r#""Hi, " + name + "!""#);
        assert_eq!(Program(&[]).to_string(), r#""""#);
    }
}
