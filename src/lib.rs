//! skillforge - compile canonical skill and agent specs for several assistant CLIs
//!
//! A spec is written once, in a platform-neutral form: a markdown file with a
//! templated YAML frontmatter block and a templated body. skillforge compiles
//! it into the dialect each target CLI expects:
//!
//! - **Claude Code**: block-style YAML sequences, exact-case tool names
//! - **GitHub Copilot CLI**: flow-style sequences, lowercase tool aliases,
//!   generated `metadata` block
//! - **Codex CLI**: the Copilot dialect with a `$gsd-` command prefix
//!
//! # Architecture Overview
//!
//! Compilation of one (spec, platform) pair is a pure pipeline:
//!
//! ```text
//! spec ──► render (templating) ──► parse YAML ──► map tools (tools)
//!      ──► field rules + metadata (frontmatter::fields) ──► clean
//!      ──► serialize (frontmatter::serializer) ──► validate ──► artifact
//! ```
//!
//! # Core Modules
//!
//! - [`platform`] - the closed set of platforms and their profiles
//! - [`value`] - the frontmatter value model
//! - [`templating`] - `{{var}}` substitution and `{{#flag}}...{{/flag}}` blocks
//! - [`tools`] - canonical tool names and the per-platform compatibility table
//! - [`frontmatter`] - field rules, cleaner, dialect serializers, validator
//! - [`spec`] - loading spec files
//! - [`compiler`] - the pipeline orchestrator and batch compilation
//!
//! # Supporting Modules
//!
//! - [`config`] - `~/.skillforge/config.toml`
//! - [`core`] - error types and user-facing error display
//! - [`cli`] - the `skillforge` command line
//!
//! # Example
//!
//! ```rust
//! use skillforge::compiler::SpecCompiler;
//! use skillforge::config::CompilerConfig;
//! use skillforge::platform::Platform;
//! use skillforge::spec::Spec;
//! use skillforge::templating::RenderContext;
//!
//! let spec = Spec::parse(
//!     "gsd-executor",
//!     "---\nname: gsd-executor\ntools: [Read, Write, Bash]\n---\n\nRun {{commandPrefix}}execute.\n",
//! )?;
//! let config = CompilerConfig::default();
//! let compiler = SpecCompiler::new(config.clone());
//!
//! for platform in Platform::ALL {
//!     let ctx = RenderContext::for_platform(platform, &config);
//!     let artifact = compiler.compile(&spec, platform, &ctx)?;
//!     assert!(artifact.validation.valid);
//! }
//! # Ok::<(), skillforge::core::CompileError>(())
//! ```
//!
//! # Configuration (`~/.skillforge/config.toml`)
//!
//! ```toml
//! version = "1.8.1"
//! project_name = "get-shit-done"
//!
//! [variables]
//! docsUrl = "https://example.com/docs"
//!
//! [tools.Notebook]
//! claude = "NotebookEdit"
//! copilot = "edit"
//! codex = false
//! ```

pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod core;
pub mod frontmatter;
pub mod platform;
pub mod spec;
pub mod templating;
pub mod tools;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
