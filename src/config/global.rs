//! Compiler configuration (`~/.skillforge/config.toml`).
//!
//! The configuration is loaded once at startup, then shared read-only with the
//! [`ToolCatalog`](crate::tools::ToolCatalog) and the
//! [`SpecCompiler`](crate::compiler::SpecCompiler). Nothing mutates it after
//! load.
//!
//! # File Format
//!
//! ```toml
//! version = "1.8.1"
//! project_name = "get-shit-done"
//! template_version = "1.0.0"
//! max_parallel = 8
//!
//! # Extra render variables, merged over the built-in ones
//! [variables]
//! docsUrl = "https://example.com/docs"
//!
//! # Add a tool the built-in table does not know
//! [tools.NotebookEdit]
//! claude = "NotebookEdit"
//! copilot = false
//! codex = false
//! warning = "Notebook editing only exists on Claude"
//!
//! # Or override one platform of a built-in tool
//! [tools.Task]
//! copilot = "delegate"
//! ```
//!
//! For `[tools.<Name>]` platform keys, a string is the platform tool name,
//! `true` keeps the canonical name and `false` marks the tool as explicitly
//! unavailable on that platform.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, FALLBACK_CORE_COUNT};
use crate::platform::Platform;
use crate::value::{FrontmatterDocument, Value};

fn default_version() -> String {
    "unknown".to_string()
}

fn default_project_name() -> String {
    "unknown".to_string()
}

fn default_template_version() -> String {
    "1.0.0".to_string()
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Project version, exposed to templates as `version` and written to
    /// generated metadata as `projectVersion`.
    #[serde(default = "default_version")]
    pub version: String,

    /// Project name written to generated metadata.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Template system version written to generated metadata.
    #[serde(default = "default_template_version")]
    pub template_version: String,

    /// Upper bound on concurrent compilations. Defaults to the core count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,

    /// Extra render variables. Merged last, so they override built-ins.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, toml::Value>,

    /// Tool compatibility additions and overrides keyed by canonical name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolOverride>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            project_name: default_project_name(),
            template_version: default_template_version(),
            max_parallel: None,
            variables: BTreeMap::new(),
            tools: BTreeMap::new(),
        }
    }
}

/// One `[tools.<Name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude: Option<ToolTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot: Option<ToolTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codex: Option<ToolTarget>,
    /// Alternative spellings that resolve to this tool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Cross-platform caveat reported by tool validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whether the tool behaves the same on every platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe: Option<bool>,
}

impl ToolOverride {
    #[must_use]
    pub fn target(&self, platform: Platform) -> Option<&ToolTarget> {
        match platform {
            Platform::Claude => self.claude.as_ref(),
            Platform::Copilot => self.copilot.as_ref(),
            Platform::Codex => self.codex.as_ref(),
        }
    }
}

/// Platform-side value of a tool override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolTarget {
    /// Platform tool name.
    Name(String),
    /// `true` keeps the canonical name, `false` marks the tool unavailable.
    Available(bool),
}

impl CompilerConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or does not match the schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse compiler config")?;
        Ok(config)
    }

    /// Load from the default location, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from `path` when given (the file must exist), else from the
    /// default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, or any file found
    /// cannot be parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        tracing::debug!(
            "Loaded config from {} ({} variables, {} tool overrides)",
            path.display(),
            config.variables.len(),
            config.tools.len()
        );
        Ok(config)
    }

    /// `~/.skillforge/config.toml`, or `%LOCALAPPDATA%\skillforge\config.toml`
    /// on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join(CONFIG_DIR_NAME.trim_start_matches('.'))
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(CONFIG_DIR_NAME)
        };

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Effective batch concurrency.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.max_parallel.filter(|n| *n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(FALLBACK_CORE_COUNT)
        })
    }

    /// `[variables]` converted to render values.
    pub fn render_variables(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.variables.iter().map(|(name, value)| (name.clone(), toml_to_value(value)))
    }
}

/// TOML datetimes have no frontmatter counterpart and become their text form.
fn toml_to_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_value(v)))
                .collect::<FrontmatterDocument>(),
        ),
    }
}
