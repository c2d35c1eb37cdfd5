//! Two-pass template renderer.
//!
//! Pass one resolves conditional blocks, pass two substitutes variables. The
//! passes run in that order over the whole text, and conditionals do not
//! nest: markers inside a block's content are literal text. Changing either
//! property changes output for templates that mix the two features.

use regex::Regex;
use std::sync::LazyLock;
use strsim::levenshtein;

use super::context::RenderContext;
use super::error::{ConditionalFault, TemplateError};
use crate::value::Value;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

// Identifiers are ASCII word characters only; `{{café}}` is plain text.
static CONDITIONAL_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{#([A-Za-z0-9_]+)\}\}").expect("conditional open pattern is valid")
});

static CONDITIONAL_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{/([A-Za-z0-9_]+)\}\}").expect("conditional close pattern is valid")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("variable pattern is valid")
});

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Leave markers for absent variables verbatim instead of failing.
    pub lenient: bool,
}

impl RenderOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            lenient: false,
        }
    }

    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            lenient: true,
        }
    }
}

/// Render `template` against `context`.
///
/// # Errors
///
/// - [`TemplateError::UndefinedVariable`] when a referenced variable is absent
///   and `options.lenient` is false
/// - [`TemplateError::MalformedConditional`] when open and close markers do not
///   pair up, regardless of `options.lenient`
///
/// # Examples
///
/// ```rust
/// use skillforge::templating::{RenderContext, RenderOptions, render};
///
/// let mut ctx = RenderContext::new();
/// ctx.insert("name", "World");
/// ctx.set_flag("isClaude", false);
///
/// let out = render("Hello {{name}}!{{#isClaude}} (claude){{/isClaude}}", &ctx, RenderOptions::strict())?;
/// assert_eq!(out, "Hello World!");
/// # Ok::<(), skillforge::templating::TemplateError>(())
/// ```
pub fn render(
    template: &str,
    context: &RenderContext,
    options: RenderOptions,
) -> Result<String, TemplateError> {
    if template.is_empty() {
        return Ok(String::new());
    }
    let with_conditionals = render_conditionals(template, context, options)?;
    substitute_variables(&with_conditionals, context, options)
}

fn render_conditionals(
    template: &str,
    context: &RenderContext,
    options: RenderOptions,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    while let Some(open) = CONDITIONAL_OPEN.captures_at(template, cursor) {
        let Some(whole) = open.get(0) else {
            break;
        };
        let name = &open[1];

        let preceding = &template[cursor..whole.start()];
        reject_stray_close(preceding)?;
        output.push_str(preceding);

        let close_marker = format!("{{{{/{name}}}}}");
        let content_start = whole.end();
        let Some(offset) = template[content_start..].find(&close_marker) else {
            return Err(TemplateError::MalformedConditional {
                variable: name.to_string(),
                fault: ConditionalFault::Unclosed,
            });
        };
        let content_end = content_start + offset;
        let block_end = content_end + close_marker.len();

        match context.get(name) {
            Some(value) => {
                if value.is_truthy() {
                    output.push_str(&template[content_start..content_end]);
                }
            }
            None if options.lenient => output.push_str(&template[whole.start()..block_end]),
            None => return Err(undefined(name, context)),
        }

        cursor = block_end;
    }

    let rest = &template[cursor..];
    reject_stray_close(rest)?;
    output.push_str(rest);
    Ok(output)
}

fn reject_stray_close(segment: &str) -> Result<(), TemplateError> {
    match CONDITIONAL_CLOSE.captures(segment) {
        Some(caps) => Err(TemplateError::MalformedConditional {
            variable: caps[1].to_string(),
            fault: ConditionalFault::UnmatchedClose,
        }),
        None => Ok(()),
    }
}

fn substitute_variables(
    text: &str,
    context: &RenderContext,
    options: RenderOptions,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for caps in VARIABLE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];
        output.push_str(&text[last..whole.start()]);

        match context.get(name) {
            Some(value) => output.push_str(&stringify(value)),
            None if options.lenient => output.push_str(whole.as_str()),
            None => return Err(undefined(name, context)),
        }

        last = whole.end();
    }

    output.push_str(&text[last..]);
    Ok(output)
}

/// String form of a value when substituted into text.
///
/// Sequences and mappings fall back to compact JSON. That is a debugging aid,
/// not a supported way to emit structured data.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(&value.to_json()).unwrap_or_default()
        }
    }
}

fn undefined(name: &str, context: &RenderContext) -> TemplateError {
    tracing::debug!(variable = name, "template references undefined variable");
    TemplateError::UndefinedVariable {
        variable: name.to_string(),
        suggestions: find_similar(name, context.names()),
    }
}

/// Names from `candidates` close enough to `target` to be a likely typo.
fn find_similar<'a>(target: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let max_distance = (target.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
    let mut scored: Vec<(usize, &str)> = candidates
        .map(|candidate| (levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored.into_iter().take(3).map(|(_, name)| name.to_string()).collect()
}
