//! Spec compilation: one canonical spec in, one platform artifact out.
//!
//! [`SpecCompiler::compile`] runs a fixed pipeline for a (spec, platform)
//! pair:
//!
//! 1. render the frontmatter source and the body (strict mode)
//! 2. parse the rendered frontmatter into a [`FrontmatterDocument`]
//! 3. map `tools` and `disallowedTools` through the [`ToolCatalog`]
//! 4. assemble: drop unsupported fields, attach generated metadata
//! 5. clean, serialize in the platform dialect, validate
//! 6. emit `---\n<frontmatter>\n---\n\n<body>`
//!
//! A failure in any step aborts that pair only and is returned as
//! [`CompileError::Stage`] naming the spec, platform and step. YAML
//! validation never fails the compilation; its result rides along on the
//! [`CompiledArtifact`].
//!
//! The compiler holds only shared, immutable state, so one instance can
//! serve many concurrent compilations. [`SpecCompiler::compile_batch`] runs
//! a set of jobs on the blocking pool with bounded parallelism.
//!
//! # Examples
//!
//! ```rust
//! use skillforge::compiler::SpecCompiler;
//! use skillforge::config::CompilerConfig;
//! use skillforge::platform::Platform;
//! use skillforge::spec::Spec;
//! use skillforge::templating::RenderContext;
//!
//! let config = CompilerConfig::default();
//! let compiler = SpecCompiler::new(config.clone());
//! let spec = Spec::parse(
//!     "gsd-planner",
//!     "---\nname: gsd-planner\ntools: [Read, Grep]\n---\n\nUse {{commandPrefix}}plan.\n",
//! )?;
//!
//! let ctx = RenderContext::for_platform(Platform::Codex, &config);
//! let artifact = compiler.compile(&spec, Platform::Codex, &ctx)?;
//! assert!(artifact.text.contains("tools: ['read', 'search']"));
//! assert!(artifact.text.ends_with("Use $gsd-plan.\n"));
//! # Ok::<(), skillforge::core::CompileError>(())
//! ```

mod prompt_length;

pub use prompt_length::{PromptLengthReport, PromptStatus, check_prompt_length};

use anyhow::Context as _;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::config::CompilerConfig;
use crate::core::{CompileError, Stage};
use crate::frontmatter::cleaner::clean;
use crate::frontmatter::fields::{
    FieldSupport, FieldWarning, GenerationMetadata, add_platform_metadata, field_support,
    transform_fields,
};
use crate::frontmatter::serialize_frontmatter;
use crate::frontmatter::validator::{ValidationResult, validate};
use crate::platform::Platform;
use crate::spec::Spec;
use crate::templating::{RenderContext, RenderOptions, render};
use crate::tools::ToolCatalog;
use crate::value::{FrontmatterDocument, Value};

/// Frontmatter fields holding canonical tool names.
const TOOL_FIELDS: [&str; 2] = ["tools", "disallowedTools"];

/// One compiled (spec, platform) artifact.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub spec: String,
    pub platform: Platform,
    /// The full artifact, ready to write.
    pub text: String,
    /// The cleaned document that was serialized.
    pub frontmatter: FrontmatterDocument,
    pub validation: ValidationResult,
    pub field_warnings: Vec<FieldWarning>,
    pub tool_warnings: Vec<String>,
    pub prompt_length: PromptLengthReport,
}

/// A unit of work for [`SpecCompiler::compile_batch`].
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub spec: Arc<Spec>,
    pub platform: Platform,
    pub context: RenderContext,
}

impl CompileJob {
    /// A job whose context is built for `platform` from `config`.
    #[must_use]
    pub fn for_platform(spec: Arc<Spec>, platform: Platform, config: &CompilerConfig) -> Self {
        Self {
            spec,
            platform,
            context: RenderContext::for_platform(platform, config),
        }
    }
}

/// Compiles specs into platform artifacts.
#[derive(Debug, Clone)]
pub struct SpecCompiler {
    catalog: Arc<ToolCatalog>,
    config: Arc<CompilerConfig>,
}

impl SpecCompiler {
    /// A compiler whose tool table includes `config`'s overrides.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        let catalog = ToolCatalog::with_overrides(&config);
        Self::with_catalog(Arc::new(catalog), Arc::new(config))
    }

    #[must_use]
    pub fn with_catalog(catalog: Arc<ToolCatalog>, config: Arc<CompilerConfig>) -> Self {
        Self {
            catalog,
            config,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile `spec` for `platform` with `context`.
    ///
    /// # Errors
    ///
    /// [`CompileError::Stage`] wrapping the first failure: an undefined
    /// variable or malformed conditional, rendered frontmatter that is not a
    /// YAML mapping, a value outside the permitted kinds, or an unknown tool.
    pub fn compile(
        &self,
        spec: &Spec,
        platform: Platform,
        context: &RenderContext,
    ) -> Result<CompiledArtifact, CompileError> {
        let at = |stage: Stage| move |e: CompileError| e.at(&spec.name, platform, stage);
        tracing::debug!("Compiling '{}' for {platform}", spec.name);

        let frontmatter_text =
            render(&spec.frontmatter_source, context, RenderOptions::strict())
                .map_err(CompileError::from)
                .map_err(at(Stage::RenderFrontmatter))?;
        let body = render(&spec.body, context, RenderOptions::strict())
            .map_err(CompileError::from)
            .map_err(at(Stage::RenderBody))?;

        let parsed = parse_frontmatter(&frontmatter_text).map_err(at(Stage::ParseFrontmatter))?;
        tracing::debug!("'{}' frontmatter has {} fields", spec.name, parsed.len());

        let (mapped, tool_warnings) =
            self.map_tool_fields(parsed, platform).map_err(at(Stage::MapTools))?;

        let (assembled, field_warnings) = transform_fields(&mapped, platform);
        let assembled = add_platform_metadata(assembled, platform, &self.metadata(spec, context));

        let frontmatter = clean(&assembled);
        let serialized = serialize_frontmatter(&frontmatter, platform);

        let validation = validate(&serialized);
        if !validation.valid {
            tracing::warn!(
                "'{}' for {platform} produced invalid frontmatter: {}",
                spec.name,
                validation.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
            );
        }

        let text = format!("---\n{serialized}\n---\n\n{body}");
        let prompt_length = check_prompt_length(&text, platform);
        match prompt_length.status {
            PromptStatus::Ok => {}
            PromptStatus::Warning => {
                tracing::warn!("'{}' is close to the {platform} limit: {prompt_length}", spec.name);
            }
            PromptStatus::Exceeded => {
                tracing::warn!("'{}' exceeds the {platform} limit: {prompt_length}", spec.name);
            }
        }

        Ok(CompiledArtifact {
            spec: spec.name.clone(),
            platform,
            text,
            frontmatter,
            validation,
            field_warnings,
            tool_warnings,
            prompt_length,
        })
    }

    /// Compile every job, at most `max_parallel` at a time.
    ///
    /// Results are in job order. A failed job does not affect the others.
    ///
    /// # Errors
    ///
    /// Returns an error only if a worker task panics or is cancelled.
    pub async fn compile_batch(
        &self,
        jobs: Vec<CompileJob>,
        max_parallel: usize,
    ) -> anyhow::Result<Vec<Result<CompiledArtifact, CompileError>>> {
        let total = jobs.len();
        tracing::debug!("Compiling {total} jobs with parallelism {max_parallel}");

        let mut results: Vec<(usize, Result<CompiledArtifact, CompileError>)> =
            stream::iter(jobs.into_iter().enumerate())
                .map(|(index, job)| {
                    let compiler = self.clone();
                    async move {
                        let result = tokio::task::spawn_blocking(move || {
                            compiler.compile(&job.spec, job.platform, &job.context)
                        })
                        .await
                        .context("Compilation task failed")?;
                        Ok::<_, anyhow::Error>((index, result))
                    }
                })
                .buffer_unordered(max_parallel.max(1))
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .collect::<anyhow::Result<_>>()?;

        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, result)| result).collect())
    }

    fn map_tool_fields(
        &self,
        mut document: FrontmatterDocument,
        platform: Platform,
    ) -> Result<(FrontmatterDocument, Vec<String>), CompileError> {
        let mut warnings = Vec::new();

        for field in TOOL_FIELDS {
            // Fields the platform drops anyway are not mapped.
            if field_support(field, platform) == FieldSupport::Unsupported {
                continue;
            }
            let Some(value) = document.get(field) else {
                continue;
            };
            let names = tool_names(field, value)?;
            let mapped = self.catalog.map_tools(&names, platform)?;
            warnings.extend(self.catalog.validate_tool_list(&names, platform).warnings);
            document.insert(field, mapped);
        }

        Ok((document, warnings))
    }

    fn metadata(&self, spec: &Spec, context: &RenderContext) -> GenerationMetadata {
        let generated = context.get("generated").and_then(Value::as_str).map_or_else(
            || chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            ToString::to_string,
        );
        GenerationMetadata {
            generated,
            template_version: self.config.template_version.clone(),
            project_version: self.config.version.clone(),
            project_name: self.config.project_name.clone(),
            source_spec: spec.source_path.clone(),
        }
    }
}

/// Parse rendered frontmatter text. Empty text is an empty document.
fn parse_frontmatter(text: &str) -> Result<FrontmatterDocument, CompileError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| CompileError::FrontmatterParse {
            message: e.to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
        })?;

    match value {
        serde_yaml::Value::Null => Ok(FrontmatterDocument::new()),
        serde_yaml::Value::Mapping(mapping) => FrontmatterDocument::from_yaml_mapping(mapping, ""),
        other => Err(CompileError::FrontmatterNotMapping {
            found: Value::from_yaml(other, "")
                .map_or_else(|_| "tagged value".to_string(), |v| v.kind().to_string()),
        }),
    }
}

/// Tool names from a sequence or a comma-separated string (`Read, Bash`).
fn tool_names(field: &str, value: &Value) -> Result<Vec<String>, CompileError> {
    match value {
        Value::String(list) => Ok(list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect()),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(name) => Ok(name.clone()),
                other => Err(CompileError::SerializationInvariantViolation {
                    path: format!("{field}[{i}]"),
                    kind: format!("tool names must be strings, found {}", other.kind()),
                }),
            })
            .collect(),
        Value::Undefined | Value::Null => Ok(Vec::new()),
        other => Err(CompileError::SerializationInvariantViolation {
            path: field.to_string(),
            kind: format!("expected a tool list, found {}", other.kind()),
        }),
    }
}
