//! Integration test suite for skillforge
//!
//! End-to-end tests of the public compiler API and of the `skillforge`
//! binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **compile_api**: full pipeline per platform through the library API
//! - **batch**: concurrent compilation and failure isolation
//! - **config**: configuration-driven variables and tool overrides
//! - **cli_compile**: `skillforge compile`
//! - **cli_check**: `skillforge check`
//! - **cli_tools**: `skillforge tools`

#[path = "../common/mod.rs"]
mod common;

mod batch;
mod cli_check;
mod cli_compile;
mod cli_tools;
mod compile_api;
mod config;
