//! Input guards for workshop actions.
//!
//! These run before any network or database call. A failed guard is a
//! [`CoreError::Validation`] and must leave all state untouched.

use crate::error::CoreError;

/// Require a non-empty, non-whitespace generation prompt.
///
/// Returns the trimmed prompt so callers send a canonical value to the
/// generation endpoint.
pub fn require_prompt(prompt: &str) -> Result<&str, CoreError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "a prompt is required to generate content".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Require a non-empty, non-whitespace character name.
pub fn require_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "a character name is required".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_rejects_empty() {
        assert!(require_prompt("").is_err());
    }

    #[test]
    fn prompt_rejects_whitespace_only() {
        assert!(require_prompt("   \t\n").is_err());
    }

    #[test]
    fn prompt_trims_valid_input() {
        assert_eq!(require_prompt("  a cat  ").unwrap(), "a cat");
    }

    #[test]
    fn name_rejects_whitespace_only() {
        let err = require_name("  ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn name_accepts_regular_input() {
        assert_eq!(require_name("Captain Nova").unwrap(), "Captain Nova");
    }
}
