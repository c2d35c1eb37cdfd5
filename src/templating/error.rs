//! Template error types.
//!
//! Rendering can fail in exactly two ways: a referenced variable is missing
//! from the context (and lenient mode is off), or the conditional markers do
//! not pair up. Both are fatal to the compilation they occur in.

use std::fmt;
use thiserror::Error;

/// Errors produced by [`render`](super::render).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Undefined variable in template: '{variable}'")]
    UndefinedVariable {
        variable: String,
        /// Context names within edit distance of `variable`.
        suggestions: Vec<String>,
    },

    #[error("Malformed conditional block '{variable}': {fault}")]
    MalformedConditional {
        variable: String,
        fault: ConditionalFault,
    },
}

/// How a conditional block is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalFault {
    /// `{{#name}}` with no `{{/name}}` after it.
    Unclosed,
    /// `{{/name}}` with no open block.
    UnmatchedClose,
}

impl fmt::Display for ConditionalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionalFault::Unclosed => f.write_str("open marker has no matching close marker"),
            ConditionalFault::UnmatchedClose => f.write_str("close marker has no matching open marker"),
        }
    }
}

impl TemplateError {
    /// Multi-line message with suggestions, for CLI output.
    #[must_use]
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::UndefinedVariable {
                variable,
                suggestions,
            } => {
                let mut msg = String::from("ERROR: Template Variable Not Found\n\n");
                msg.push_str(&format!("Variable: {variable}\n"));
                if !suggestions.is_empty() {
                    msg.push_str("\nDid you mean:\n");
                    for suggestion in suggestions {
                        msg.push_str(&format!("  - {suggestion}\n"));
                    }
                }
                msg
            }
            TemplateError::MalformedConditional {
                variable,
                fault,
            } => {
                format!(
                    "ERROR: Malformed Conditional\n\nBlock: {{{{#{variable}}}}}\nProblem: {fault}\n\nConditional blocks do not nest; every open marker needs a close marker with the same name.\n"
                )
            }
        }
    }
}
