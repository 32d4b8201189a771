//! Local prompt validation
//!
//! Runs before any network traffic. The remote service is authoritative
//! for any further limits; the client only rejects prompts that are
//! obviously too short to refine.

use thiserror::Error;

/// Minimum prompt length after trimming surrounding whitespace
pub const MIN_PROMPT_CHARS: usize = 5;

/// Validation failures for user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a prompt (at least {MIN_PROMPT_CHARS} characters)")]
    TooShort,
}

/// Check that a raw prompt is acceptable for submission
///
/// Surrounding whitespace is ignored for the length check. The prompt
/// itself is never modified - the caller submits the original text.
pub fn validate_prompt(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().chars().count() < MIN_PROMPT_CHARS {
        return Err(ValidationError::TooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(validate_prompt(""), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_short_prompt_rejected() {
        assert_eq!(validate_prompt("hi"), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_whitespace_not_counted() {
        // 4 real characters padded with whitespace
        assert_eq!(validate_prompt("   hiya   "), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert_eq!(validate_prompt("        "), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_exactly_minimum_accepted() {
        assert!(validate_prompt("hello").is_ok());
    }

    #[test]
    fn test_typical_prompt_accepted() {
        assert!(validate_prompt("Write code for login page").is_ok());
    }

    #[test]
    fn test_multibyte_characters_counted_once() {
        assert!(validate_prompt("héllo").is_ok());
        assert_eq!(validate_prompt("héll"), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_error_message() {
        let msg = ValidationError::TooShort.to_string();
        assert_eq!(msg, "Please enter a prompt (at least 5 characters)");
    }
}
