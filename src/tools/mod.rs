//! Canonical to platform tool name translation.
//!
//! Specs declare tools by canonical name (`Bash`, `Read`, `Grep`, ...). Each
//! platform spells them differently, and some platforms lack a tool entirely.
//! [`ToolCatalog`] holds the compatibility table: the built-in rows plus any
//! `[tools.<Name>]` overrides from [`CompilerConfig`]. It is built once and
//! shared read-only between compilations.
//!
//! # Built-in table
//!
//! | Canonical | Claude | Copilot / Codex |
//! |-----------|--------|-----------------|
//! | `Bash` | `Bash` | `execute` |
//! | `Read` | `Read` | `read` |
//! | `Edit`, `Write` | unchanged | `edit` |
//! | `Grep`, `Glob` | unchanged | `search` |
//! | `Task` | `Task` | `agent` |
//! | `WebFetch`, `WebSearch` | unchanged | unavailable |
//!
//! # Mapping rules
//!
//! - Output order follows input order
//! - `mcp__<server>__<tool>` names pass through unchanged on every platform
//! - A tool marked unavailable on the platform is dropped with a warning
//! - Two tools mapping to the same platform name are emitted once, at the
//!   first position
//! - A tool with no table entry for the platform is [`CompileError::UnknownTool`]
//!
//! # Examples
//!
//! ```rust
//! use skillforge::platform::Platform;
//! use skillforge::tools::ToolCatalog;
//!
//! let catalog = ToolCatalog::builtin();
//! let mapped = catalog.map_tools(&["Read", "Grep", "Glob", "Bash"], Platform::Copilot)?;
//! assert_eq!(mapped, vec!["read", "search", "execute"]);
//! # Ok::<(), skillforge::core::CompileError>(())
//! ```

mod table;

use std::collections::{BTreeMap, HashSet};

use crate::config::{CompilerConfig, ToolTarget};
use crate::constants::MCP_TOOL_PREFIX;
use crate::core::CompileError;
use crate::platform::Platform;

/// How a tool appears on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformTool {
    /// Emitted under this name.
    Name(String),
    /// Explicitly not available; dropped from artifacts.
    Unavailable,
}

/// One row of the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    pub canonical: String,
    claude: Option<PlatformTool>,
    copilot: Option<PlatformTool>,
    codex: Option<PlatformTool>,
    pub aliases: Vec<String>,
    /// Whether the tool behaves the same on every platform.
    pub safe: bool,
    pub warning: Option<String>,
}

impl ToolEntry {
    fn empty(canonical: &str) -> Self {
        Self {
            canonical: canonical.to_string(),
            claude: None,
            copilot: None,
            codex: None,
            aliases: Vec::new(),
            safe: true,
            warning: None,
        }
    }

    /// The platform's column, `None` when the table has no entry for it.
    #[must_use]
    pub fn on(&self, platform: Platform) -> Option<&PlatformTool> {
        match platform {
            Platform::Claude => self.claude.as_ref(),
            Platform::Copilot => self.copilot.as_ref(),
            Platform::Codex => self.codex.as_ref(),
        }
    }

    fn slot_mut(&mut self, platform: Platform) -> &mut Option<PlatformTool> {
        match platform {
            Platform::Claude => &mut self.claude,
            Platform::Copilot => &mut self.copilot,
            Platform::Codex => &mut self.codex,
        }
    }
}

/// Result of [`ToolCatalog::validate_tool_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolValidation {
    /// True when every tool has a table entry for the platform.
    pub valid: bool,
    /// Platform names for the tools that did map, in [`map_tools`](ToolCatalog::map_tools) order.
    pub mapped: Vec<String>,
    /// Every tool without an entry, in input order.
    pub unknown_tools: Vec<String>,
    /// Non-fatal cross-platform caveats.
    pub warnings: Vec<String>,
}

/// Per-platform support of one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSupport {
    pub supported: bool,
    /// Platform tool name when supported.
    pub name: Option<String>,
}

/// Result of [`ToolCatalog::get_tool_compatibility`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCompatibility {
    pub canonical: String,
    pub platforms: Vec<(Platform, PlatformSupport)>,
    pub aliases: Vec<String>,
    pub safe: bool,
    pub warning: Option<String>,
}

impl ToolCompatibility {
    #[must_use]
    pub fn support(&self, platform: Platform) -> Option<&PlatformSupport> {
        self.platforms.iter().find(|(p, _)| *p == platform).map(|(_, s)| s)
    }
}

/// The tool compatibility table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCatalog {
    entries: BTreeMap<String, ToolEntry>,
}

impl ToolCatalog {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = table::BUILTIN_TOOLS
            .iter()
            .map(|row| {
                let column = |name: Option<&str>| {
                    Some(name.map_or(PlatformTool::Unavailable, |n| PlatformTool::Name(n.into())))
                };
                let entry = ToolEntry {
                    canonical: row.canonical.to_string(),
                    claude: column(Some(row.claude)),
                    copilot: column(row.copilot),
                    codex: column(row.codex),
                    aliases: row.aliases.iter().map(ToString::to_string).collect(),
                    safe: row.safe,
                    warning: row.warning.map(ToString::to_string),
                };
                (row.canonical.to_string(), entry)
            })
            .collect();
        Self {
            entries,
        }
    }

    /// The built-in table with `[tools.<Name>]` overrides from `config` applied.
    ///
    /// Platforms an override does not mention keep their built-in column. A
    /// new tool has no entry for unmentioned platforms, so using it there
    /// fails with [`CompileError::UnknownTool`].
    #[must_use]
    pub fn with_overrides(config: &CompilerConfig) -> Self {
        let mut catalog = Self::builtin();
        for (name, tool) in &config.tools {
            let entry =
                catalog.entries.entry(name.clone()).or_insert_with(|| ToolEntry::empty(name));
            for platform in Platform::ALL {
                if let Some(target) = tool.target(platform) {
                    *entry.slot_mut(platform) = Some(match target {
                        ToolTarget::Name(n) => PlatformTool::Name(n.clone()),
                        ToolTarget::Available(true) => PlatformTool::Name(name.clone()),
                        ToolTarget::Available(false) => PlatformTool::Unavailable,
                    });
                }
            }
            if !tool.aliases.is_empty() {
                entry.aliases.clone_from(&tool.aliases);
            }
            if let Some(warning) = &tool.warning {
                entry.warning = Some(warning.clone());
            }
            if let Some(safe) = tool.safe {
                entry.safe = safe;
            }
            tracing::debug!("Applied tool override for '{name}'");
        }
        catalog
    }

    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<&ToolEntry> {
        self.entries.get(canonical)
    }

    /// Canonical names in the table, sorted.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Translate canonical tool names for `platform`.
    ///
    /// # Errors
    ///
    /// [`CompileError::UnknownTool`] naming the first tool without an entry
    /// for `platform`.
    pub fn map_tools<S: AsRef<str>>(
        &self,
        tools: &[S],
        platform: Platform,
    ) -> Result<Vec<String>, CompileError> {
        let mut mapped = Vec::with_capacity(tools.len());
        let mut seen = HashSet::new();

        for tool in tools {
            let tool = tool.as_ref();
            match self.resolve(tool, platform) {
                Resolution::Mapped(name) => {
                    if seen.insert(name.clone()) {
                        mapped.push(name);
                    }
                }
                Resolution::Unavailable => {
                    tracing::warn!("Tool '{tool}' is not available on {platform}, omitting it");
                }
                Resolution::Unknown => {
                    return Err(CompileError::UnknownTool {
                        tool: tool.to_string(),
                        platform,
                    });
                }
            }
        }

        Ok(mapped)
    }

    /// Check every tool at once without failing.
    #[must_use]
    pub fn validate_tool_list<S: AsRef<str>>(
        &self,
        tools: &[S],
        platform: Platform,
    ) -> ToolValidation {
        let mut report = ToolValidation::default();
        let mut seen = HashSet::new();

        for tool in tools {
            let tool = tool.as_ref();
            match self.resolve(tool, platform) {
                Resolution::Mapped(name) => {
                    if seen.insert(name.clone()) {
                        report.mapped.push(name);
                    }
                    if let Some(entry) = self.entries.get(tool)
                        && !entry.safe
                        && let Some(warning) = &entry.warning
                    {
                        report.warnings.push(format!("{tool}: {warning}"));
                    }
                }
                Resolution::Unavailable => {
                    report.warnings.push(format!("{tool} is not available on {platform}"));
                }
                Resolution::Unknown => report.unknown_tools.push(tool.to_string()),
            }
        }

        report.valid = report.unknown_tools.is_empty();
        report
    }

    /// Per-platform support for `tool`, or `None` when it is not in the table.
    #[must_use]
    pub fn get_tool_compatibility(&self, tool: &str) -> Option<ToolCompatibility> {
        let entry = self.entries.get(tool)?;
        let platforms = Platform::ALL
            .into_iter()
            .map(|platform| {
                let support = match entry.on(platform) {
                    Some(PlatformTool::Name(name)) => PlatformSupport {
                        supported: true,
                        name: Some(name.clone()),
                    },
                    Some(PlatformTool::Unavailable) | None => PlatformSupport {
                        supported: false,
                        name: None,
                    },
                };
                (platform, support)
            })
            .collect();

        Some(ToolCompatibility {
            canonical: entry.canonical.clone(),
            platforms,
            aliases: entry.aliases.clone(),
            safe: entry.safe,
            warning: entry.warning.clone(),
        })
    }

    fn resolve(&self, tool: &str, platform: Platform) -> Resolution {
        if tool.starts_with(MCP_TOOL_PREFIX) {
            return Resolution::Mapped(tool.to_string());
        }
        match self.entries.get(tool).and_then(|entry| entry.on(platform)) {
            Some(PlatformTool::Name(name)) => Resolution::Mapped(name.clone()),
            Some(PlatformTool::Unavailable) => Resolution::Unavailable,
            None => Resolution::Unknown,
        }
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

enum Resolution {
    Mapped(String),
    Unavailable,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_claude_keeps_canonical_names() -> Result<()> {
        let catalog = ToolCatalog::builtin();
        let mapped = catalog.map_tools(&["Read", "Write", "WebFetch"], Platform::Claude)?;
        assert_eq!(mapped, vec!["Read", "Write", "WebFetch"]);
        Ok(())
    }

    #[test]
    fn test_mapping_preserves_order() -> Result<()> {
        let catalog = ToolCatalog::builtin();
        for platform in Platform::ALL {
            let forward = catalog.map_tools(&["Bash", "Read", "Task"], platform)?;
            let reverse = catalog.map_tools(&["Task", "Read", "Bash"], platform)?;
            let mut reversed = forward.clone();
            reversed.reverse();
            assert_eq!(reverse, reversed, "order not preserved on {platform}");
        }
        Ok(())
    }

    #[test]
    fn test_unavailable_tools_are_omitted() -> Result<()> {
        let catalog = ToolCatalog::builtin();
        let mapped = catalog.map_tools(&["Read", "WebFetch", "WebSearch"], Platform::Codex)?;
        assert_eq!(mapped, vec!["read"]);
        Ok(())
    }

    #[test]
    fn test_duplicate_platform_names_collapse() -> Result<()> {
        let catalog = ToolCatalog::builtin();
        let mapped =
            catalog.map_tools(&["Edit", "Grep", "Write", "Glob", "Bash"], Platform::Copilot)?;
        assert_eq!(mapped, vec!["edit", "search", "execute"]);
        Ok(())
    }

    #[test]
    fn test_mcp_tools_pass_through() -> Result<()> {
        let catalog = ToolCatalog::builtin();
        for platform in Platform::ALL {
            let mapped = catalog.map_tools(&["mcp__github__create_issue"], platform)?;
            assert_eq!(mapped, vec!["mcp__github__create_issue"]);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_tool_names_first_offender() {
        let catalog = ToolCatalog::builtin();
        let err = catalog.map_tools(&["Read", "Teleport", "Summon"], Platform::Copilot).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnknownTool { ref tool, platform: Platform::Copilot } if tool == "Teleport"
        ));
    }

    #[test]
    fn test_validate_reports_all_unknown_tools() {
        let catalog = ToolCatalog::builtin();
        let report =
            catalog.validate_tool_list(&["Teleport", "Read", "Summon", "WebFetch"], Platform::Copilot);
        assert!(!report.valid);
        assert_eq!(report.unknown_tools, vec!["Teleport", "Summon"]);
        assert_eq!(report.mapped, vec!["read"]);
        assert!(report.warnings.iter().any(|w| w.contains("WebFetch is not available on copilot")));
    }

    #[test]
    fn test_validate_warns_for_unsafe_tools() {
        let catalog = ToolCatalog::builtin();
        let report = catalog.validate_tool_list(&["Write", "Read"], Platform::Claude);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Write: "));
    }

    #[test]
    fn test_compatibility_lookup() {
        let catalog = ToolCatalog::builtin();
        let compat = catalog.get_tool_compatibility("WebSearch").unwrap();
        assert!(compat.support(Platform::Claude).unwrap().supported);
        assert!(!compat.support(Platform::Copilot).unwrap().supported);
        assert!(!compat.safe);
        assert!(catalog.get_tool_compatibility("Teleport").is_none());

        let grep = catalog.get_tool_compatibility("Grep").unwrap();
        assert_eq!(grep.support(Platform::Codex).unwrap().name.as_deref(), Some("search"));
    }

    #[test]
    fn test_every_builtin_tool_covers_every_platform() {
        let catalog = ToolCatalog::builtin();
        for name in catalog.canonical_names() {
            let entry = catalog.get(name).unwrap();
            for platform in Platform::ALL {
                assert!(entry.on(platform).is_some(), "{name} missing on {platform}");
            }
        }
    }

    #[test]
    fn test_overrides_add_and_replace() -> Result<()> {
        let config = CompilerConfig::from_toml_str(
            r#"
[tools.Task]
copilot = "delegate"

[tools.NotebookEdit]
claude = true
copilot = false
"#,
        )?;
        let catalog = ToolCatalog::with_overrides(&config);

        assert_eq!(catalog.map_tools(&["Task"], Platform::Copilot)?, vec!["delegate"]);
        assert_eq!(catalog.map_tools(&["Task"], Platform::Codex)?, vec!["agent"]);
        assert_eq!(catalog.map_tools(&["NotebookEdit"], Platform::Claude)?, vec!["NotebookEdit"]);
        assert!(catalog.map_tools(&["NotebookEdit"], Platform::Copilot)?.is_empty());

        // Not mentioned for codex: no entry
        assert!(matches!(
            catalog.map_tools(&["NotebookEdit"], Platform::Codex),
            Err(CompileError::UnknownTool { .. })
        ));
        Ok(())
    }
}
