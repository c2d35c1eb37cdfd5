//! Error handling for skillforge
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** for every failure the compiler can hit, so
//!    callers can match on the failure kind
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Taxonomy
//!
//! - [`CompileError::Template`] - undefined variables and malformed conditionals
//!   (see [`TemplateError`])
//! - [`CompileError::UnknownTool`] - a canonical tool with no compatibility entry
//! - [`CompileError::SerializationInvariantViolation`] - a frontmatter value that
//!   is not one of the permitted kinds
//! - [`CompileError::FrontmatterParse`] - rendered frontmatter that is not YAML
//! - [`CompileError::Stage`] - any of the above, tagged with the spec name,
//!   platform and pipeline stage where it happened
//!
//! YAML validation of serializer output is deliberately *not* an error; it
//! produces a [`ValidationResult`](crate::frontmatter::validator::ValidationResult).
//!
//! # Examples
//!
//! ```rust,no_run
//! use skillforge::core::{CompileError, user_friendly_error};
//! use skillforge::platform::Platform;
//!
//! let err = CompileError::UnknownTool {
//!     tool: "Teleport".to_string(),
//!     platform: Platform::Copilot,
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::platform::Platform;
use crate::templating::TemplateError;

/// Pipeline stage a compilation failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RenderFrontmatter,
    RenderBody,
    ParseFrontmatter,
    MapTools,
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RenderFrontmatter => "render-frontmatter",
            Stage::RenderBody => "render-body",
            Stage::ParseFrontmatter => "parse-frontmatter",
            Stage::MapTools => "map-tools",
            Stage::Assemble => "assemble",
        };
        f.write_str(name)
    }
}

/// The main error type for spec compilation.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Template rendering failed (undefined variable, malformed conditional).
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A canonical tool name has no compatibility entry.
    #[error("Unknown tool '{tool}' has no mapping for platform '{platform}'")]
    UnknownTool {
        /// The first unmapped tool name
        tool: String,
        /// Platform the mapping was requested for
        platform: Platform,
    },

    /// A document value is outside the permitted kinds.
    ///
    /// This points at a malformed spec upstream of the compiler.
    #[error("Frontmatter value at '{path}' cannot be serialized: {kind}")]
    SerializationInvariantViolation {
        /// Dotted field path of the offending value
        path: String,
        /// What was found instead
        kind: String,
    },

    /// The rendered frontmatter text could not be parsed as YAML.
    #[error("Rendered frontmatter is not valid YAML{}: {message}", format_location(.line, .column))]
    FrontmatterParse {
        message: String,
        /// 1-indexed line, when the parser reports one
        line: Option<usize>,
        /// 1-indexed column, when the parser reports one
        column: Option<usize>,
    },

    /// Rendered frontmatter parsed, but not to a mapping.
    #[error("Frontmatter must be a mapping, found {found}")]
    FrontmatterNotMapping {
        found: String,
    },

    /// Any failure above, attributed to one (spec, platform) pair.
    #[error("Failed to compile '{spec}' for {platform} ({stage}): {error}")]
    Stage {
        spec: String,
        platform: Platform,
        stage: Stage,
        error: Box<CompileError>,
    },
}

fn format_location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" (line {line}, column {column})"),
        (Some(line), None) => format!(" (line {line})"),
        _ => String::new(),
    }
}

impl CompileError {
    /// Attach spec name, platform and stage to an error.
    #[must_use]
    pub fn at(self, spec: &str, platform: Platform, stage: Stage) -> Self {
        CompileError::Stage {
            spec: spec.to_string(),
            platform,
            stage,
            error: Box::new(self),
        }
    }

    /// The innermost error, with any stage attribution stripped.
    #[must_use]
    pub fn root(&self) -> &CompileError {
        match self {
            CompileError::Stage {
                error,
                ..
            } => error.root(),
            other => other,
        }
    }
}

/// Error wrapper with user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: anyhow::Error,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {:#}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known compiler errors get a targeted suggestion; I/O and TOML errors get a
/// generic one; everything else is passed through as-is.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = error.downcast_ref::<CompileError>().map(|e| suggestion_for(e.root()));
    if let Some((suggestion, details)) = suggestion {
        let ctx = ErrorContext::new(error).with_suggestion(suggestion);
        return match details {
            Some(details) => ctx.with_details(details),
            None => ctx,
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                "Check that the file or directory exists and the path is correct"
            }
            std::io::ErrorKind::PermissionDenied => "Check file ownership and permissions",
            _ => "Check the file system state and try again",
        };
        return ErrorContext::new(error).with_suggestion(suggestion);
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in your skillforge config file")
            .with_details("TOML errors are usually missing quotes or mismatched brackets");
    }

    ErrorContext::new(error)
}

fn suggestion_for(error: &CompileError) -> (String, Option<String>) {
    match error {
        CompileError::Template(TemplateError::UndefinedVariable {
            suggestions,
            ..
        }) => {
            let details = if suggestions.is_empty() {
                None
            } else {
                Some(format!("Did you mean: {}?", suggestions.join(", ")))
            };
            (
                "Define the variable in the [variables] table of your config, or fix the name"
                    .to_string(),
                details,
            )
        }
        CompileError::Template(TemplateError::MalformedConditional {
            ..
        }) => (
            "Every {{#name}} block needs a matching {{/name}} close marker".to_string(),
            Some("Conditional blocks do not nest".to_string()),
        ),
        CompileError::UnknownTool {
            ..
        } => (
            "Add the tool to a [tools.<Name>] table in your config, or use a canonical tool"
                .to_string(),
            None,
        ),
        CompileError::SerializationInvariantViolation {
            ..
        } => ("Remove YAML tags and complex keys from the spec frontmatter".to_string(), None),
        CompileError::FrontmatterParse {
            ..
        }
        | CompileError::FrontmatterNotMapping {
            ..
        } => (
            "Check the spec frontmatter after variable substitution; quote values containing ':'"
                .to_string(),
            None,
        ),
        CompileError::Stage {
            error,
            ..
        } => suggestion_for(error),
    }
}
