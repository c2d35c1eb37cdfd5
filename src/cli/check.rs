//! `skillforge check`: validate the frontmatter block of a markdown file.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::frontmatter::validator::{ValidationIssue, ValidationResult, validate};
use crate::spec::Spec;

#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Markdown file with a leading `---` frontmatter block.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckCommand {
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let spec = Spec::parse(self.file.display().to_string(), &content)?;
        let result = to_file_lines(validate(&spec.frontmatter_source));

        match self.format {
            OutputFormat::Json => {
                let errors: Vec<_> = result
                    .errors
                    .iter()
                    .map(|issue| {
                        serde_json::json!({
                            "line": issue.line,
                            "column": issue.column,
                            "message": issue.message,
                            "snippet": issue.snippet,
                        })
                    })
                    .collect();
                let report = serde_json::json!({
                    "file": self.file.display().to_string(),
                    "valid": result.valid,
                    "errors": errors,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if result.valid {
                    if !quiet {
                        println!("{} {}: frontmatter is valid", "✓".green(), self.file.display());
                    }
                } else {
                    println!("{} {}: invalid frontmatter", "✗".red(), self.file.display());
                    for issue in &result.errors {
                        println!("  {issue}");
                    }
                }
            }
        }

        if result.valid {
            Ok(())
        } else {
            Err(anyhow!("{} has invalid frontmatter", self.file.display()))
        }
    }
}

/// Shift issue lines past the opening `---` so they point into the file.
fn to_file_lines(result: ValidationResult) -> ValidationResult {
    ValidationResult {
        valid: result.valid,
        errors: result
            .errors
            .into_iter()
            .map(|issue| ValidationIssue {
                line: issue.line.map(|line| line + 1),
                ..issue
            })
            .collect(),
    }
}
