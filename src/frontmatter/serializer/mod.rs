//! Platform-dialect YAML frontmatter serializers.
//!
//! Two dialects exist, differing only in how sequences are written:
//!
//! | Platform | Style | `skills: [a, b]` becomes |
//! |----------|-------|--------------------------|
//! | Claude | [`BlockSerializer`] | `skills:\n  - a\n  - b` |
//! | Copilot, Codex | [`FlowSerializer`] | `skills: ['a', 'b']` |
//!
//! Everything else is shared and lives in the provided methods of
//! [`FrontmatterSerializer`]:
//!
//! - **Field order**: fields in [`CANONICAL_FIELD_ORDER`] come first, then
//!   the rest in document order. Nested mappings keep document order.
//! - **Omission**: undefined values and empty sequences are dropped;
//!   `false` and `0` are kept.
//! - **Nesting**: mappings indent two spaces per level, at any depth. A
//!   mapping with nothing left to emit is written as `{}`.
//! - **Scalar quoting**: see [`format_scalar`].
//!
//! Output has no `---` delimiters and no trailing newline. Serialization is
//! total over [`FrontmatterDocument`]; it never fails.

mod block;
mod flow;


pub use block::BlockSerializer;
pub use flow::FlowSerializer;

use regex::Regex;
use std::sync::LazyLock;

use crate::value::{FrontmatterDocument, Value};

/// Fields emitted first, in this order, when present.
pub const CANONICAL_FIELD_ORDER: [&str; 6] =
    ["name", "description", "tools", "disallowedTools", "skills", "metadata"];

/// Spaces per nesting level.
pub const INDENT: usize = 2;

/// Longest key YAML accepts in implicit `key: value` form.
const MAX_IMPLICIT_KEY_LEN: usize = 1024;

static DATE_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date pattern is valid"));

static VERSION_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+(\.\d+)?$").expect("version pattern is valid"));

static YAML_SIGNIFICANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[>|*&!%@`#"'?,-]|[:{}\[\]]|\s#|^\s|\s$"#).expect("indicator pattern is valid")
});

/// How a dialect writes sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayStyle {
    /// One `- item` per line under the key.
    Block,
    /// `key: ['a', 'b']` on one line.
    Flow,
}

/// The serializer for a dialect.
#[must_use]
pub fn serializer_for(style: ArrayStyle) -> &'static dyn FrontmatterSerializer {
    static BLOCK: BlockSerializer = BlockSerializer;
    static FLOW: FlowSerializer = FlowSerializer;
    match style {
        ArrayStyle::Block => &BLOCK,
        ArrayStyle::Flow => &FLOW,
    }
}

/// Shared contract of the per-dialect serializers.
///
/// Implementors only decide how a non-empty sequence field is written; the
/// provided methods handle ordering, omission, nesting and scalars.
pub trait FrontmatterSerializer: Send + Sync {
    fn style(&self) -> ArrayStyle;

    /// Append the lines for `key` holding `items` (never empty) at `indent`.
    ///
    /// `key` is already formatted for output.
    fn write_sequence(&self, lines: &mut Vec<String>, indent: usize, key: &str, items: &[Value]);

    /// Serialize a whole document.
    fn serialize(&self, document: &FrontmatterDocument) -> String {
        let mut lines = Vec::new();
        for (key, value) in ordered_fields(document) {
            self.write_entry(&mut lines, 0, key, value);
        }
        lines.join("\n")
    }

    /// Append the lines for one `key: value` entry at `indent`.
    fn write_entry(&self, lines: &mut Vec<String>, indent: usize, key: &str, value: &Value) {
        if !is_emitted(value) {
            return;
        }
        let pad = " ".repeat(indent);
        let key = block_key(key, &pad);
        match value {
            Value::Sequence(items) => self.write_sequence(lines, indent, &key, items),
            Value::Mapping(doc) => {
                if doc.iter().any(|(_, v)| is_emitted(v)) {
                    lines.push(format!("{pad}{key}:"));
                    for (child_key, child) in doc.iter() {
                        self.write_entry(lines, indent + INDENT, child_key, child);
                    }
                } else {
                    lines.push(format!("{pad}{key}: {{}}"));
                }
            }
            scalar => lines.push(format!("{pad}{key}: {}", format_scalar(scalar))),
        }
    }
}

/// Top-level fields in output order.
pub fn ordered_fields(document: &FrontmatterDocument) -> impl Iterator<Item = (&str, &Value)> {
    let canonical = CANONICAL_FIELD_ORDER
        .iter()
        .filter_map(|name| document.get(name).map(|value| (*name, value)));
    let rest = document.iter().filter(|(key, _)| !CANONICAL_FIELD_ORDER.contains(key));
    canonical.chain(rest)
}

/// Whether a mapping entry holding `value` produces output.
#[must_use]
pub fn is_emitted(value: &Value) -> bool {
    match value {
        Value::Undefined => false,
        Value::Sequence(items) => !items.is_empty(),
        _ => true,
    }
}

/// A scalar in block context (after `key: ` or `- `).
///
/// Strings stay plain unless YAML would read them as something else:
///
/// - dates (`2026-01-28...`) and versions (`2.0.0`, `1.2`) are single-quoted
///   so they stay strings
/// - values starting with an indicator (`> | * & ! % @ ` # - " ' ? ,`) or
///   containing `: { } [ ]` are quoted
/// - empty values, edge whitespace, ` #`, control characters, line
///   separators and anything else that would not read back as the same
///   string are quoted
///
/// Quoting uses single quotes unless the value contains `'` or a character
/// only escapes can carry, in which case it is double-quoted.
#[must_use]
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_plain_string(s),
        Value::Sequence(_) | Value::Mapping(_) => inline_value(value),
    }
}

/// A value in flow context: strings always quoted, collections inline.
#[must_use]
pub fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote_single(s),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(inline_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(doc) => {
            let entries: Vec<String> = doc
                .iter()
                .filter(|(_, v)| !matches!(v, Value::Undefined))
                .map(|(k, v)| format!("{}: {}", flow_key(k), inline_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        scalar => format_scalar(scalar),
    }
}

/// A mapping key. Same rules as string scalars.
#[must_use]
pub fn format_key(key: &str) -> String {
    format_plain_string(key)
}

/// A key in block context, switched to explicit `? key` form when too long
/// for an implicit key. The result ends with a line break and `pad`, so
/// callers writing `{pad}{key}:` put the `:` on its own line.
fn block_key(key: &str, pad: &str) -> String {
    let key = format_key(key);
    if key.len() >= MAX_IMPLICIT_KEY_LEN { format!("? {key}\n{pad}") } else { key }
}

/// A key inside `{...}`, where a `,` anywhere ends the key.
fn flow_key(key: &str) -> String {
    let key = if key.contains(',') { quote_single(key) } else { format_key(key) };
    if key.len() >= MAX_IMPLICIT_KEY_LEN { format!("? {key}") } else { key }
}

/// Characters plain and single-quoted scalars cannot carry. YAML reads
/// U+2028 and U+2029 as line breaks and U+FEFF as a byte order mark.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn format_plain_string(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || DATE_LIKE.is_match(s)
        || VERSION_LIKE.is_match(s)
        || YAML_SIGNIFICANT.is_match(s)
        || s.chars().any(needs_escape)
        || !reads_back_as_string(s);

    if !needs_quotes {
        s.to_string()
    } else if s.contains('\'') || s.chars().any(needs_escape) {
        quote_double(s)
    } else {
        format!("'{s}'")
    }
}

/// Single-quoted, doubling embedded quotes. Falls back to double quotes for
/// characters single-quoted scalars cannot carry.
fn quote_single(s: &str) -> String {
    if s.chars().any(needs_escape) {
        quote_double(s)
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}

fn quote_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Catches plain scalars YAML resolves to another type (`true`, `null`, `12`, `~`).
fn reads_back_as_string(s: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    )
}
