//! Request input validation and sanitation.
//!
//! Runs before anything else: a request that names a write operation or
//! carries script-injection content never reaches a provider.

use std::sync::LazyLock;

use palisade_core::constants::{MAX_REQUEST_LEN, MIN_REQUEST_LEN};
use palisade_core::errors::{PalisadeError, PalisadeResult};
use palisade_core::models::TranslationRequest;
use regex::Regex;

static SUSPICIOUS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)data:",
        r"(?i)vbscript:",
        r"(?i)on\w+\s*=",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("suspicious pattern is valid"))
    .collect()
});

static WRITE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(insert|update|delete|drop|truncate|alter|create)\b")
        .expect("write-word pattern is valid")
});

/// Validate the natural-language input of a request and return the
/// sanitized text the rest of the pipeline runs on.
pub fn validate(request: &TranslationRequest) -> PalisadeResult<String> {
    let text = sanitize(&request.text);

    if text.len() < MIN_REQUEST_LEN {
        return Err(PalisadeError::InvalidRequest {
            reason: "the question must not be empty".to_string(),
        });
    }
    if text.len() > MAX_REQUEST_LEN {
        return Err(PalisadeError::InvalidRequest {
            reason: format!("the question must not exceed {MAX_REQUEST_LEN} characters"),
        });
    }

    if SUSPICIOUS.iter().any(|p| p.is_match(&text)) {
        return Err(PalisadeError::InvalidRequest {
            reason: "the question contains suspicious content".to_string(),
        });
    }

    if let Some(m) = WRITE_WORD.find(&text) {
        return Err(PalisadeError::InvalidRequest {
            reason: format!(
                "operation '{}' is not permitted; only read queries are answered",
                m.as_str().to_uppercase()
            ),
        });
    }

    Ok(text)
}

/// Strip control characters and collapse whitespace runs.
fn sanitize(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> TranslationRequest {
        TranslationRequest::new(text, "v1")
    }

    #[test]
    fn normal_question_passes() {
        assert!(validate(&request("how many employees per department?")).is_ok());
    }

    #[test]
    fn empty_question_rejected() {
        assert!(validate(&request("   ")).is_err());
    }

    #[test]
    fn oversized_question_rejected() {
        assert!(validate(&request(&"x".repeat(1001))).is_err());
    }

    #[test]
    fn script_tag_rejected() {
        assert!(validate(&request("<script>alert(1)</script>")).is_err());
    }

    #[test]
    fn write_operation_word_rejected() {
        let err = validate(&request("please delete all employees")).unwrap_err();
        assert!(err.to_string().contains("DELETE"));
    }

    #[test]
    fn derived_word_forms_are_allowed() {
        // "created" is not the operation "create".
        assert!(validate(&request("contracts created in 2024")).is_ok());
    }

    #[test]
    fn controls_are_stripped_and_whitespace_collapsed() {
        let text = validate(&request("a\x00b\n\n  c")).unwrap();
        assert_eq!(text, "ab c");
    }

    #[test]
    fn control_characters_cannot_hide_suspicious_content() {
        assert!(validate(&request("<scr\x00ipt>alert(1)</script>")).is_err());
    }
}
