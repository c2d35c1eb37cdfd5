//! Constants shared across the skillforge codebase.
//!
//! Thresholds and file names that more than one module needs are defined
//! here so magic numbers stay discoverable.

/// Directory under the home directory holding the config file.
pub const CONFIG_DIR_NAME: &str = ".skillforge";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default CPU core count when detection fails.
///
/// Used as a fallback when `std::thread::available_parallelism()` returns an error.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Prompt usage percentage above which a length warning is reported.
pub const PROMPT_WARNING_PERCENT: f64 = 90.0;

/// Prompt usage percentage above which the artifact exceeds its platform limit.
pub const PROMPT_ERROR_PERCENT: f64 = 100.0;

/// Frontmatter key whose sequence value is flattened to a bracketed string.
pub const ARGUMENT_HINT_FIELD: &str = "argument-hint";

/// Prefix of MCP tool names, which pass through tool mapping unchanged.
pub const MCP_TOOL_PREFIX: &str = "mcp__";
