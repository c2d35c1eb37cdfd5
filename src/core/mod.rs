//! Core types shared across the compiler.
//!
//! # Error Management
//!
//! skillforge splits errors into two layers:
//! - **Strongly-typed errors** ([`CompileError`]) returned by every pipeline
//!   stage, each attributable to a (spec, platform) pair through
//!   [`CompileError::at`]
//! - **User-friendly contexts** ([`ErrorContext`]) built in the binary with
//!   [`user_friendly_error`], carrying an actionable suggestion
//!
//! ```rust
//! use skillforge::core::{CompileError, Stage};
//! use skillforge::platform::Platform;
//!
//! let err = CompileError::UnknownTool {
//!     tool: "Teleport".to_string(),
//!     platform: Platform::Copilot,
//! }
//! .at("gsd-planner", Platform::Copilot, Stage::MapTools);
//!
//! assert!(err.to_string().starts_with("Failed to compile 'gsd-planner' for copilot"));
//! ```

pub mod error;

pub use error::{CompileError, ErrorContext, Stage, user_friendly_error};
