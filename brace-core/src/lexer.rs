//! Tokenizer: splits a template into literal and expression segments.
//!
//! Scanning is non-greedy: each `{{` is closed by the nearest following `}}`,
//! whatever lies between them. Tags never nest.

use crate::config::UnterminatedTagPolicy;
use crate::error::TemplateError;
use crate::types::{Token, CLOSE, OPEN};

/// Tokenize `template`, keeping an unterminated `{{` as literal text.
///
/// Never fails. An empty template yields no tokens.
pub fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while let Some((start, end)) = next_tag(template, cursor) {
        if start > cursor {
            tokens.push(Token::literal(&template[cursor..start], cursor));
        }
        tokens.push(Token::expression(&template[start..end], start));
        cursor = end;
    }

    if cursor < template.len() {
        tokens.push(Token::literal(&template[cursor..], cursor));
    }
    tokens
}

/// Tokenize `template` under an explicit unterminated-tag policy.
pub fn tokenize_with(
    template: &str,
    policy: UnterminatedTagPolicy,
) -> Result<Vec<Token>, TemplateError> {
    let tokens = tokenize(template);
    if policy == UnterminatedTagPolicy::Error {
        // Only the trailing literal can hold a `{{` without a closer: any
        // earlier literal is followed by a complete tag.
        if let Some(last) = tokens.last().filter(|t| t.inner().is_none()) {
            if let Some(pos) = last.text.find(OPEN) {
                return Err(TemplateError::UnterminatedTag { offset: last.offset + pos });
            }
        }
    }
    Ok(tokens)
}

/// Byte span `[start, end)` of the next complete `{{…}}` at or after `from`.
fn next_tag(template: &str, from: usize) -> Option<(usize, usize)> {
    let start = from + template[from..].find(OPEN)?;
    let body = start + OPEN.len();
    let close = body + template[body..].find(CLOSE)?;
    Some((start, close + CLOSE.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenKind;

    fn kinds(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn empty_template_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn plain_text_is_one_literal() {
        let tokens = tokenize("just text");
        assert_eq!(kinds(&tokens), vec![(TokenKind::Literal, "just text")]);
    }

    #[test]
    fn mixed_template_splits_in_order() {
        let tokens = tokenize("Hi {{ name }}, bye {{x}}!");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Literal, "Hi "),
                (TokenKind::Expression, "{{ name }}"),
                (TokenKind::Literal, ", bye "),
                (TokenKind::Expression, "{{x}}"),
                (TokenKind::Literal, "!"),
            ]
        );
        assert_eq!(tokens[1].offset, 3);
        assert_eq!(tokens[3].offset, 19);
    }

    #[test]
    fn adjacent_tags_have_no_literal_between() {
        let tokens = tokenize("{{a}}{{b}}");
        assert_eq!(
            kinds(&tokens),
            vec![(TokenKind::Expression, "{{a}}"), (TokenKind::Expression, "{{b}}")]
        );
    }

    #[test]
    fn nearest_close_wins() {
        let tokens = tokenize("{{{name}}}");
        assert_eq!(
            kinds(&tokens),
            vec![(TokenKind::Expression, "{{{name}}"), (TokenKind::Literal, "}")]
        );
    }

    #[test]
    fn empty_tag_is_still_an_expression() {
        let tokens = tokenize("a{{}}b");
        assert_eq!(tokens[1].kind, TokenKind::Expression);
        assert_eq!(tokens[1].text, "{{}}");
    }

    #[test]
    fn unterminated_tag_falls_back_to_literal() {
        let tokens = tokenize("x {{a}} y {{ b");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Literal, "x "),
                (TokenKind::Expression, "{{a}}"),
                (TokenKind::Literal, " y {{ b"),
            ]
        );
    }

    #[test]
    fn strict_policy_reports_unterminated_offset() {
        let err = tokenize_with("x {{a}} y {{ b", UnterminatedTagPolicy::Error).unwrap_err();
        assert_eq!(err, TemplateError::UnterminatedTag { offset: 10 });
    }

    #[test]
    fn strict_policy_accepts_stray_closer() {
        let tokens = tokenize_with("a }} b", UnterminatedTagPolicy::Error).unwrap();
        assert_eq!(kinds(&tokens), vec![(TokenKind::Literal, "a }} b")]);
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let tokens = tokenize("héllo {{ n }}");
        assert_eq!(tokens[1].offset, "héllo ".len());
        assert_eq!(tokens.iter().map(|t| t.text.as_str()).collect::<String>(), "héllo {{ n }}");
    }
}
