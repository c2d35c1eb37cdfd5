//! Command-line interface for skillforge.
//!
//! The binary is a thin front end over the library:
//!
//! - `compile` - compile a spec file for one or more platforms
//! - `check` - validate the frontmatter block of a markdown file
//! - `tools` - map canonical tool names for a platform and report problems
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//! - `--config` / `-c`: configuration file (also `SKILLFORGE_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! skillforge compile specs/agents/gsd-planner.md --platform copilot --platform codex
//! skillforge compile specs/agents/gsd-planner.md -p claude --out-dir dist
//! skillforge check dist/copilot/gsd-planner.md
//! skillforge tools Read Grep Glob WebFetch --platform codex
//! ```

mod check;
mod compile;
mod tools;


use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::CompilerConfig;

/// Output format for commands that report results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colored markers.
    #[default]
    Text,
    /// Structured JSON for scripts.
    Json,
}

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "skillforge",
    about = "Compile canonical skill and agent specs for Claude Code, Copilot CLI and Codex CLI",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (default: ~/.skillforge/config.toml).
    #[arg(short, long, global = true, env = "SKILLFORGE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a spec for one or more platforms.
    Compile(compile::CompileCommand),

    /// Validate the frontmatter of a markdown file.
    Check(check::CheckCommand),

    /// Map canonical tool names for a platform.
    Tools(tools::ToolsCommand),
}

impl Cli {
    /// Log filter implied by `--verbose` / `--quiet`.
    ///
    /// `None` leaves the choice to `RUST_LOG`.
    #[must_use]
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Load configuration and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command fails.
    pub async fn execute(self) -> Result<()> {
        let config = CompilerConfig::load_with_optional(self.config.clone()).await?;
        self.execute_with_config(config).await
    }

    /// Run the selected command with an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn execute_with_config(self, config: CompilerConfig) -> Result<()> {
        match self.command {
            Commands::Compile(cmd) => cmd.execute(config, self.quiet).await,
            Commands::Check(cmd) => cmd.execute(self.quiet).await,
            Commands::Tools(cmd) => cmd.execute(&config),
        }
    }
}
