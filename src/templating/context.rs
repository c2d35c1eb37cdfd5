//! Render context construction.
//!
//! A [`RenderContext`] is built fresh for every (spec, platform) compilation
//! because the platform flags differ between platforms. It holds two
//! namespaces that share one lookup: flat variables and boolean platform
//! flags. Variables shadow flags of the same name.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::config::CompilerConfig;
use crate::platform::Platform;
use crate::value::Value;

static TRUE: Value = Value::Bool(true);
static FALSE: Value = Value::Bool(false);

/// Variables and flags visible to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    variables: BTreeMap<String, Value>,
    flags: BTreeMap<String, bool>,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for `platform` dated today (UTC).
    #[must_use]
    pub fn for_platform(platform: Platform, config: &CompilerConfig) -> Self {
        Self::for_platform_at(platform, config, chrono::Utc::now().date_naive())
    }

    /// Context for `platform` with an explicit generation date.
    ///
    /// Exposed variables:
    ///
    /// | Name | Value |
    /// |------|-------|
    /// | `platform` | `claude`, `copilot` or `codex` |
    /// | `platformName` | human readable platform name |
    /// | `version` | `config.version` |
    /// | `projectName` | `config.project_name` |
    /// | `generated` | `generated` as `YYYY-MM-DD` |
    /// | `commandPrefix` | `/gsd-` or `$gsd-` |
    /// | `platformRoot` | `.claude`, `.github` or `.codex` |
    /// | `supportsModel`, `supportsHooks`, `supportsMcp`, `supportsSkills`, `supportsWildcards` | booleans |
    /// | `charLimit` | prompt length limit |
    ///
    /// Flags `isClaude`, `isCopilot` and `isCodex` are set, exactly one true.
    /// Entries from `config.variables` are merged last and win.
    #[must_use]
    pub fn for_platform_at(platform: Platform, config: &CompilerConfig, generated: NaiveDate) -> Self {
        let profile = platform.profile();
        let caps = profile.capabilities;
        let mut ctx = Self::new();

        ctx.insert("platform", platform.as_str());
        ctx.insert("platformName", platform.display_name());
        ctx.insert("version", config.version.as_str());
        ctx.insert("projectName", config.project_name.as_str());
        ctx.insert("generated", generated.format("%Y-%m-%d").to_string());
        ctx.insert("commandPrefix", profile.command_prefix);
        ctx.insert("platformRoot", profile.platform_root);
        ctx.insert("supportsModel", caps.supports_model);
        ctx.insert("supportsHooks", caps.supports_hooks);
        ctx.insert("supportsMcp", caps.supports_mcp);
        ctx.insert("supportsSkills", caps.supports_skills);
        ctx.insert("supportsWildcards", caps.supports_wildcards);
        ctx.insert("charLimit", caps.char_limit);

        for candidate in Platform::ALL {
            ctx.set_flag(candidate.flag_name(), candidate == platform);
        }

        for (name, value) in config.render_variables() {
            ctx.insert(name, value);
        }

        ctx
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Look up a name, variables first, then flags.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).or_else(|| {
            self.flags.get(name).map(|flag| if *flag { &TRUE } else { &FALSE })
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Every name resolvable in this context.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().chain(self.flags.keys()).map(String::as_str)
    }
}
