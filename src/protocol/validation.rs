use super::footer::looks_like_footer;
use serde::{Deserialize, Serialize};

pub const ISSUE_REPLY_EMPTY: &str = "Reply empty";
pub const ISSUE_MISSING_TAG_LINE: &str = "Missing leading tag line";
pub const ISSUE_MISSING_FOOTER: &str = "Missing footer metadata";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

/// Structural check of an assistant reply: a leading tag line and a trailing
/// footer line. Tag legality and footer completeness are not checked.
pub fn validate_assistant_reply(text: &str) -> ValidationResult {
    let lines = reply_lines(text);

    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return ValidationResult::from_issues(vec![ISSUE_REPLY_EMPTY.to_string()]);
    };

    let mut issues = Vec::new();
    if !(first.starts_with('<') || first.starts_with("!<")) {
        issues.push(ISSUE_MISSING_TAG_LINE.to_string());
    }
    if !looks_like_footer(last) {
        issues.push(ISSUE_MISSING_FOOTER.to_string());
    }
    ValidationResult::from_issues(issues)
}

/// Newline-separated lines with empty lines kept in position. Empty text has
/// no lines; a trailing `\r` is dropped from each line.
pub(crate) fn reply_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
