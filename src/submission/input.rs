use crate::{config::Sanitize, predictor::Language};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_MAX_TITLE_CHARS: usize = 200;

static ENGLISH_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s]+$").expect("static pattern compiles"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text first")]
    Empty,

    #[error("Text is too long ({len} characters), keep it within {limit}")]
    TooLong { len: usize, limit: usize },
}

/// Trims `raw` and checks it against the optional character limit.
pub fn validate(raw: &str, limit: Option<usize>) -> Result<&str, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some(limit) = limit {
        let len = text.chars().count();
        if len > limit {
            return Err(ValidationError::TooLong { len, limit });
        }
    }

    Ok(text)
}

/// Strips denylisted characters. This is not an escaping step; output is
/// escaped when rendered as markup.
pub fn sanitize(text: &str, mode: Sanitize) -> String {
    match mode {
        Sanitize::None => text.to_string(),
        Sanitize::Quotes => text.chars().filter(|c| !matches!(c, '\'' | '"')).collect(),
        Sanitize::QuotesAndBackslash => text
            .chars()
            .filter(|c| !matches!(c, '\'' | '"' | '\\'))
            .collect(),
    }
}

pub fn classify_language(text: &str) -> Language {
    if ENGLISH_TEXT.is_match(text) {
        Language::En
    } else {
        Language::Zh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn test_blank_input_is_empty(#[case] raw: &str) {
        assert_eq!(validate(raw, Some(200)), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_trims() {
        assert_eq!(
            validate("  The sky turned green overnight  ", Some(200)),
            Ok("The sky turned green overnight")
        );
    }

    #[test]
    fn test_length_limit() {
        let at_limit = "a".repeat(200);
        let over_limit = "a".repeat(201);

        assert!(validate(&at_limit, Some(200)).is_ok());
        assert_eq!(
            validate(&over_limit, Some(200)),
            Err(ValidationError::TooLong {
                len: 201,
                limit: 200
            })
        );
        assert!(validate(&over_limit, None).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let chinese = "假".repeat(200);
        assert!(validate(&chinese, Some(200)).is_ok());
    }

    #[test]
    fn test_length_applies_after_trim() {
        let padded = format!("   {}   ", "b".repeat(200));
        assert!(validate(&padded, Some(200)).is_ok());
    }

    #[rstest]
    #[case(Sanitize::None, r#"it's "news" \o/"#, r#"it's "news" \o/"#)]
    #[case(Sanitize::Quotes, r#"it's "news" \o/"#, r#"its news \o/"#)]
    #[case(Sanitize::QuotesAndBackslash, r#"it's "news" \o/"#, "its news o/")]
    fn test_sanitize(#[case] mode: Sanitize, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input, mode), expected);
    }

    #[rstest]
    #[case(Sanitize::Quotes)]
    #[case(Sanitize::QuotesAndBackslash)]
    fn test_sanitize_is_idempotent(#[case] mode: Sanitize) {
        for input in [r#"a'b"c\d"#, "plain", "''\"\"", "混合 'text'"] {
            let once = sanitize(input, mode);
            assert_eq!(sanitize(&once, mode), once);
        }
    }

    #[rstest]
    #[case("The sky turned green overnight", Language::En)]
    #[case("Breaking 2024 news", Language::En)]
    #[case("tabs\tand\nnewlines", Language::En)]
    #[case("政治風波", Language::Zh)]
    #[case("Mixed 中文 text", Language::Zh)]
    #[case("Punctuation, too!", Language::Zh)]
    #[case("", Language::Zh)]
    fn test_classify_language(#[case] text: &str, #[case] expected: Language) {
        assert_eq!(classify_language(text), expected);
    }
}
