//! Short code generation and validation utilities.
//!
//! Generated codes are six characters drawn uniformly from `[A-Za-z0-9]`
//! (62^6 ≈ 5.6×10^10 possible codes). Custom codes supplied by callers may be
//! anywhere from one to ten characters from the same alphabet.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of every generated code.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Maximum length of any code, generated or custom.
pub const MAX_CODE_LENGTH: usize = 10;

/// Compiled pattern every stored code must match.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("code pattern is a valid regex")
});

/// Generates a random short code.
///
/// Each character is sampled independently from the 62-character alphanumeric
/// alphabet using the thread-local RNG. Calls share no state, so concurrent
/// requests can generate codes without coordination.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns a lazy, endless stream of independently generated codes.
///
/// Callers bound it with [`Iterator::take`].
pub fn code_candidates() -> impl Iterator<Item = String> {
    std::iter::repeat_with(generate_code)
}

/// Returns `true` if the code matches `^[A-Za-z0-9]{1,10}$`.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a generated or custom short code.
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] unless the code is 1-10 ASCII
/// letters or digits.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_code("promo2025").is_ok());
/// assert!(validate_code("my-link").is_err());     // hyphen
/// assert!(validate_code("abcdefghijk").is_err()); // 11 characters
/// ```
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        return Ok(());
    }

    Err(AppError::invalid_code_format(
        "Code must be 1-10 alphanumeric characters",
        json!({ "code": code, "max_length": MAX_CODE_LENGTH }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..200 {
            assert!(validate_code(&generate_code()).is_ok());
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = code_candidates().take(1000).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let seen: HashSet<char> = code_candidates()
            .take(2000)
            .flat_map(|c| c.chars().collect::<Vec<_>>())
            .collect();

        assert!(seen.iter().any(|c| c.is_ascii_uppercase()));
        assert!(seen.iter().any(|c| c.is_ascii_lowercase()));
        assert!(seen.iter().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_code_candidates_is_lazy_and_bounded_by_take() {
        assert_eq!(code_candidates().take(3).count(), 3);
    }

    #[test]
    fn test_validate_single_character() {
        assert!(validate_code("a").is_ok());
        assert!(validate_code("Z").is_ok());
        assert!(validate_code("7").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_code("abcDEF1234").is_ok());
    }

    #[test]
    fn test_validate_mixed_case() {
        assert!(validate_code("MyCode123").is_ok());
    }

    #[test]
    fn test_validate_too_long() {
        let result = validate_code("abcdefghijk");
        assert!(matches!(result, Err(AppError::InvalidCodeFormat { .. })));
    }

    #[test]
    fn test_validate_empty_string() {
        let result = validate_code("");
        assert!(matches!(result, Err(AppError::InvalidCodeFormat { .. })));
    }

    #[test]
    fn test_validate_hyphen_not_allowed() {
        assert!(validate_code("my-link").is_err());
    }

    #[test]
    fn test_validate_underscore_not_allowed() {
        assert!(validate_code("my_link").is_err());
    }

    #[test]
    fn test_validate_spaces_not_allowed() {
        assert!(validate_code("my code").is_err());
        assert!(validate_code(" abc").is_err());
    }

    #[test]
    fn test_validate_non_ascii_letters_not_allowed() {
        assert!(validate_code("café").is_err());
        assert!(validate_code("ссылка").is_err());
    }

    #[test]
    fn test_validate_error_message() {
        let err = validate_code("bad.code").unwrap_err();
        assert!(err.to_string().contains("1-10 alphanumeric"));
    }
}
