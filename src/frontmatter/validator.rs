//! YAML round-trip validation of serialized frontmatter.
//!
//! Serializer output is treated as untrusted and parsed back with
//! `serde_yaml`. A failure is reported as data, never as an error or panic,
//! so callers decide whether a broken artifact aborts installation or is
//! only reported.

use std::fmt;

/// One problem found in frontmatter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// 1-indexed line, when the parser reports a location.
    pub line: Option<usize>,
    /// 1-indexed column, when the parser reports a location.
    pub column: Option<usize>,
    pub message: String,
    /// The source line at `line`.
    pub snippet: Option<String>,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{line}:{column}: {}", self.message)?,
            (Some(line), None) => write!(f, "{line}: {}", self.message)?,
            _ => f.write_str(&self.message)?,
        }
        if let Some(snippet) = &self.snippet {
            write!(f, "\n    | {snippet}")?;
        }
        Ok(())
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn failed(issue: ValidationIssue) -> Self {
        Self {
            valid: false,
            errors: vec![issue],
        }
    }
}

/// Parse `text` as YAML and check it is a mapping (or empty).
///
/// # Examples
///
/// ```rust
/// use skillforge::frontmatter::validator::validate;
///
/// assert!(validate("tools: [Bash, Read]").valid);
///
/// let result = validate("tools: [Bash, Read");
/// assert!(!result.valid);
/// assert!(result.errors[0].line.is_some());
/// ```
#[must_use]
pub fn validate(text: &str) -> ValidationResult {
    match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(serde_yaml::Value::Mapping(_) | serde_yaml::Value::Null) => ValidationResult::ok(),
        Ok(other) => ValidationResult::failed(ValidationIssue {
            line: Some(1),
            column: Some(1),
            message: format!("frontmatter must be a mapping, found {}", kind_name(&other)),
            snippet: text.lines().next().map(str::to_string),
        }),
        Err(err) => {
            let location = err.location();
            let line = location.as_ref().map(serde_yaml::Location::line);
            let column = location.as_ref().map(serde_yaml::Location::column);
            tracing::debug!("Frontmatter failed YAML validation: {err}");
            ValidationResult::failed(ValidationIssue {
                line,
                column,
                message: err.to_string(),
                snippet: line.and_then(|line| snippet_at(text, line)),
            })
        }
    }
}

/// Source line `line` (1-indexed), clamped to the last line for
/// end-of-input errors.
fn snippet_at(text: &str, line: usize) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let index = line.saturating_sub(1).min(lines.len().checked_sub(1)?);
    Some(lines[index].to_string())
}

fn kind_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mapping() {
        let result = validate("name: x\ntools:\n  - Read\n");
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_text_is_valid() {
        assert!(validate("").valid);
    }

    #[test]
    fn test_unbalanced_bracket_reports_location() {
        let result = validate("tools: [Bash, Read");
        assert!(!result.valid);
        let issue = &result.errors[0];
        assert!(issue.line.is_some());
        assert!(issue.column.is_some());
        assert!(issue.snippet.is_some());
    }

    #[test]
    fn test_bad_indentation_points_at_line() {
        let text = "name: x\ndescription: y\n  bad: indent\n";
        let result = validate(text);
        assert!(!result.valid);
        let line = result.errors[0].line.unwrap();
        assert!((2..=3).contains(&line), "unexpected line {line}");
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let result = validate("just a string");
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("a string"));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue {
            line: Some(2),
            column: Some(5),
            message: "bad".into(),
            snippet: Some("x: [".into()),
        };
        assert_eq!(issue.to_string(), "2:5: bad\n    | x: [");
    }

    #[test]
    fn test_snippet_clamps_to_last_line() {
        assert_eq!(snippet_at("a\nb", 9), Some("b".to_string()));
        assert_eq!(snippet_at("", 1), None);
    }
}
