//! Built-in tool compatibility table.

/// One row of the built-in table. `None` marks a tool as explicitly
/// unavailable on that platform.
pub(super) struct BuiltinTool {
    pub canonical: &'static str,
    pub claude: &'static str,
    pub copilot: Option<&'static str>,
    pub codex: Option<&'static str>,
    pub aliases: &'static [&'static str],
    pub safe: bool,
    pub warning: Option<&'static str>,
}

pub(super) const BUILTIN_TOOLS: &[BuiltinTool] = &[
    BuiltinTool {
        canonical: "Bash",
        claude: "Bash",
        copilot: Some("execute"),
        codex: Some("execute"),
        aliases: &["execute", "shell", "powershell"],
        safe: true,
        warning: None,
    },
    BuiltinTool {
        canonical: "Read",
        claude: "Read",
        copilot: Some("read"),
        codex: Some("read"),
        aliases: &["view", "NotebookRead"],
        safe: true,
        warning: None,
    },
    BuiltinTool {
        canonical: "Edit",
        claude: "Edit",
        copilot: Some("edit"),
        codex: Some("edit"),
        aliases: &["MultiEdit", "create"],
        safe: true,
        warning: None,
    },
    BuiltinTool {
        canonical: "Write",
        claude: "Write",
        copilot: Some("edit"),
        codex: Some("edit"),
        aliases: &["MultiEdit"],
        safe: false,
        warning: Some("Write is Claude-specific. Use Edit for cross-platform compatibility."),
    },
    BuiltinTool {
        canonical: "Grep",
        claude: "Grep",
        copilot: Some("search"),
        codex: Some("search"),
        aliases: &["search"],
        safe: true,
        warning: None,
    },
    BuiltinTool {
        canonical: "Glob",
        claude: "Glob",
        copilot: Some("search"),
        codex: Some("search"),
        aliases: &[],
        safe: true,
        warning: None,
    },
    BuiltinTool {
        canonical: "Task",
        claude: "Task",
        copilot: Some("agent"),
        codex: Some("agent"),
        aliases: &["agent", "custom-agent"],
        safe: true,
        warning: Some("Task invocation may have different agent types available per platform"),
    },
    BuiltinTool {
        canonical: "WebFetch",
        claude: "WebFetch",
        copilot: None,
        codex: None,
        aliases: &[],
        safe: false,
        warning: Some("WebFetch is Claude-only. Not available on Copilot or Codex."),
    },
    BuiltinTool {
        canonical: "WebSearch",
        claude: "WebSearch",
        copilot: None,
        codex: None,
        aliases: &[],
        safe: false,
        warning: Some("WebSearch is Claude-only. Not available on Copilot or Codex."),
    },
];
