//! Platform field support and generated metadata.
//!
//! Some frontmatter fields only mean something on one platform. Before
//! cleaning, [`transform_fields`] drops the fields the target platform does
//! not support and reports each drop as a [`FieldWarning`]. Fields with no
//! rule are preserved untouched.
//!
//! | Field | Claude | Copilot | Codex |
//! |-------|--------|---------|-------|
//! | `model`, `color`, `hooks`, `skills`, `disallowedTools` | yes | no | no |
//! | `mcp-servers` | no | yes | no |
//!
//! Copilot and Codex artifacts also carry a nested `metadata` block
//! describing how they were generated; see [`GenerationMetadata`].

use std::fmt;

use crate::platform::Platform;
use crate::value::{FrontmatterDocument, Value};

struct FieldRule {
    field: &'static str,
    platforms: &'static [Platform],
    reason: &'static str,
    suggestion: &'static str,
}

const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: "model",
        platforms: &[Platform::Claude],
        reason: "the agent runs on the main conversation model",
        suggestion: "Remove the model field or wrap it in {{#isClaude}}",
    },
    FieldRule {
        field: "color",
        platforms: &[Platform::Claude],
        reason: "agent colors are not supported",
        suggestion: "Remove the color field or wrap it in {{#isClaude}}",
    },
    FieldRule {
        field: "hooks",
        platforms: &[Platform::Claude],
        reason: "lifecycle hooks are not supported",
        suggestion: "Move initialization into the prompt text",
    },
    FieldRule {
        field: "skills",
        platforms: &[Platform::Claude],
        reason: "the skills system is not supported",
        suggestion: "Embed the skill content in the prompt text",
    },
    FieldRule {
        field: "disallowedTools",
        platforms: &[Platform::Claude],
        reason: "only the tools allowlist is supported",
        suggestion: "Use the tools allowlist instead",
    },
    FieldRule {
        field: "mcp-servers",
        platforms: &[Platform::Copilot],
        reason: "MCP servers are configured globally",
        suggestion: "Configure the MCP server in the platform's global settings",
    },
];

/// Whether a field may appear in a platform's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSupport {
    Supported,
    Unsupported,
    /// No rule exists; the field is passed through.
    Unknown,
}

#[must_use]
pub fn field_support(field: &str, platform: Platform) -> FieldSupport {
    match FIELD_RULES.iter().find(|rule| rule.field == field) {
        Some(rule) if rule.platforms.contains(&platform) => FieldSupport::Supported,
        Some(_) => FieldSupport::Unsupported,
        None => FieldSupport::Unknown,
    }
}

/// A field dropped because the platform does not support it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub platform: Platform,
    pub reason: String,
    pub suggestion: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' dropped for {}: {} ({})",
            self.field, self.platform, self.reason, self.suggestion
        )
    }
}

/// Drop fields `platform` does not support.
#[must_use]
pub fn transform_fields(
    document: &FrontmatterDocument,
    platform: Platform,
) -> (FrontmatterDocument, Vec<FieldWarning>) {
    let mut kept = FrontmatterDocument::new();
    let mut warnings = Vec::new();

    for (field, value) in document.iter() {
        match FIELD_RULES.iter().find(|rule| rule.field == field) {
            Some(rule) if !rule.platforms.contains(&platform) => {
                tracing::warn!("Dropping '{field}' for {platform}: {}", rule.reason);
                warnings.push(FieldWarning {
                    field: field.to_string(),
                    platform,
                    reason: rule.reason.to_string(),
                    suggestion: rule.suggestion.to_string(),
                });
            }
            _ => kept.insert(field, value.clone()),
        }
    }

    (kept, warnings)
}

/// Contents of the generated `metadata` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationMetadata {
    /// Generation date, `YYYY-MM-DD`.
    pub generated: String,
    pub template_version: String,
    pub project_version: String,
    pub project_name: String,
    /// Path of the spec the artifact was compiled from.
    pub source_spec: Option<String>,
}

impl GenerationMetadata {
    /// The block as a document, in its emitted field order.
    #[must_use]
    pub fn to_document(&self, platform: Platform) -> FrontmatterDocument {
        let mut doc = FrontmatterDocument::new()
            .with("platform", platform.as_str())
            .with("generated", self.generated.as_str())
            .with("templateVersion", self.template_version.as_str())
            .with("projectVersion", self.project_version.as_str())
            .with("projectName", self.project_name.as_str());
        if let Some(source) = &self.source_spec {
            doc.insert("sourceSpec", source.as_str());
        }
        doc
    }
}

/// Attach `metadata` for platforms whose profile asks for it.
///
/// Claude documents are returned unchanged. An existing `metadata` field is
/// replaced.
#[must_use]
pub fn add_platform_metadata(
    document: FrontmatterDocument,
    platform: Platform,
    metadata: &GenerationMetadata,
) -> FrontmatterDocument {
    if !platform.profile().generates_metadata {
        return document;
    }
    let mut document = document;
    document.insert("metadata", Value::Mapping(metadata.to_document(platform)));
    document
}
