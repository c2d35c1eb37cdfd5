//! Configuration management for skillforge.
//!
//! A single user-level file, `~/.skillforge/config.toml`, supplies the project
//! identity used in render contexts and generated metadata, extra render
//! variables, and tool compatibility overrides. See [`CompilerConfig`] for
//! the file format.
//!
//! # Resolution
//!
//! 1. `--config <PATH>` (or `SKILLFORGE_CONFIG`): must exist
//! 2. `~/.skillforge/config.toml`: used when present
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use skillforge::config::CompilerConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = CompilerConfig::load_with_optional(None).await?;
//! println!("compiling {} v{}", config.project_name, config.version);
//! # Ok(())
//! # }
//! ```

pub mod global;

pub use global::{CompilerConfig, ToolOverride, ToolTarget};
