//! Canonical spec loading.
//!
//! A spec is a markdown file whose leading `---` block is frontmatter
//! *source text* and whose remainder is the body. The frontmatter is kept as
//! text rather than parsed here because it may contain template markers
//! (`{{#isClaude}}model: opus{{/isClaude}}`) that are only valid YAML after
//! rendering.

use anyhow::{Context, Result};
use gray_matter::{Matter, Pod, engine::Engine};
use std::path::Path;

use crate::core::CompileError;
use crate::value::FrontmatterDocument;

/// gray_matter engine that hands back the frontmatter text unparsed.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// A canonical spec: frontmatter source and body, both still templated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// Identifier used in error messages, usually the file stem.
    pub name: String,
    /// Path the spec was read from, recorded in generated metadata.
    pub source_path: Option<String>,
    pub frontmatter_source: String,
    pub body: String,
}

impl Spec {
    /// Split markdown `content` into frontmatter source and body.
    ///
    /// Content without a leading `---` block has empty frontmatter. Leading
    /// newlines of the body are dropped since the artifact format inserts its
    /// own blank line after the closing delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::FrontmatterParse`] if the delimiters cannot be split.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skillforge::spec::Spec;
    ///
    /// let spec = Spec::parse("gsd-debug", "---\nname: gsd-debug\n---\n\n# Debug\n")?;
    /// assert_eq!(spec.frontmatter_source.trim(), "name: gsd-debug");
    /// assert_eq!(spec.body, "# Debug\n");
    /// # Ok::<(), skillforge::core::CompileError>(())
    /// ```
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, CompileError> {
        let matter = Matter::<RawFrontmatter>::new();
        let parsed = matter.parse::<String>(content).map_err(|e| CompileError::FrontmatterParse {
            message: e.to_string(),
            line: None,
            column: None,
        })?;

        let frontmatter_source = parsed.data.unwrap_or_default();
        let body = if frontmatter_source.is_empty() && !content.trim_start().starts_with("---") {
            content.to_string()
        } else {
            parsed.content
        };

        Ok(Self {
            name: name.into(),
            source_path: None,
            frontmatter_source,
            body: body.trim_start_matches(['\r', '\n']).to_string(),
        })
    }

    /// Build a spec from an in-memory document and body.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::SerializationInvariantViolation`] if the
    /// document cannot be written as YAML.
    pub fn from_document(
        name: impl Into<String>,
        frontmatter: &FrontmatterDocument,
        body: impl Into<String>,
    ) -> Result<Self, CompileError> {
        let frontmatter_source = if frontmatter.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&frontmatter.to_yaml_mapping()).map_err(|e| {
                CompileError::SerializationInvariantViolation {
                    path: String::new(),
                    kind: e.to_string(),
                }
            })?
        };

        Ok(Self {
            name: name.into(),
            source_path: None,
            frontmatter_source,
            body: body.into(),
        })
    }

    /// Read and parse a spec file. The name is the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its frontmatter cannot be split.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read spec {}", path.display()))?;
        let name = path
            .file_stem()
            .map_or_else(|| "spec".to_string(), |stem| stem.to_string_lossy().into_owned());

        let spec = Self::parse(name, &content)
            .with_context(|| format!("Failed to parse spec {}", path.display()))?;
        tracing::debug!("Loaded spec '{}' from {}", spec.name, path.display());
        Ok(spec.with_source_path(path.display().to_string()))
    }

    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}
