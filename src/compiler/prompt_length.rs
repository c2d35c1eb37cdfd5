//! Artifact length against platform prompt limits.

use std::fmt;

use crate::constants::{PROMPT_ERROR_PERCENT, PROMPT_WARNING_PERCENT};
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStatus {
    Ok,
    /// Above 90% of the limit.
    Warning,
    /// Above the limit.
    Exceeded,
}

/// Result of [`check_prompt_length`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptLengthReport {
    /// Length in characters.
    pub length: usize,
    pub limit: usize,
    /// `length / limit` as a percentage.
    pub percent: f64,
    pub status: PromptStatus,
}

impl PromptLengthReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == PromptStatus::Ok
    }
}

impl fmt::Display for PromptLengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} characters ({:.1}%)", self.length, self.limit, self.percent)
    }
}

/// Compare `text` with `platform`'s character limit.
///
/// ```rust
/// use skillforge::compiler::{PromptStatus, check_prompt_length};
/// use skillforge::platform::Platform;
///
/// let report = check_prompt_length(&"x".repeat(28_000), Platform::Copilot);
/// assert_eq!(report.status, PromptStatus::Warning);
/// ```
#[must_use]
pub fn check_prompt_length(text: &str, platform: Platform) -> PromptLengthReport {
    let length = text.chars().count();
    let limit = platform.profile().capabilities.char_limit;
    let percent = length as f64 / limit as f64 * 100.0;

    let status = if percent > PROMPT_ERROR_PERCENT {
        PromptStatus::Exceeded
    } else if percent > PROMPT_WARNING_PERCENT {
        PromptStatus::Warning
    } else {
        PromptStatus::Ok
    };

    PromptLengthReport {
        length,
        limit,
        percent,
        status,
    }
}
