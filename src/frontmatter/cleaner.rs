//! Frontmatter cleanup before serialization.
//!
//! [`clean`] drops fields that carry no information (`""`, `null`,
//! undefined, `[]`) and keeps explicit falsy values (`false`, `0`). Nested
//! mappings are cleaned the same way. Cleaning produces a new document and
//! is idempotent.
//!
//! `argument-hint` is special: written as a sequence it is flattened into
//! the bracketed string form `[a, b, c]` that command docs use.

use crate::constants::ARGUMENT_HINT_FIELD;
use crate::templating::stringify;
use crate::value::{FrontmatterDocument, Value};

/// Clean a document.
///
/// # Examples
///
/// ```rust
/// use skillforge::frontmatter::cleaner::clean;
/// use skillforge::value::{FrontmatterDocument, Value};
///
/// let doc = FrontmatterDocument::new()
///     .with("name", "gsd-debug")
///     .with("model", "")
///     .with("argument-hint", vec!["issue", "--verbose"])
///     .with("retries", 0_i64);
///
/// let cleaned = clean(&doc);
/// assert!(!cleaned.contains_key("model"));
/// assert_eq!(cleaned.get("argument-hint"), Some(&Value::from("[issue, --verbose]")));
/// assert_eq!(cleaned.get("retries"), Some(&Value::from(0_i64)));
/// ```
#[must_use]
pub fn clean(document: &FrontmatterDocument) -> FrontmatterDocument {
    clean_mapping(document, true)
}

fn clean_mapping(document: &FrontmatterDocument, top_level: bool) -> FrontmatterDocument {
    document
        .iter()
        .filter(|(_, value)| !is_empty(value))
        .map(|(key, value)| {
            let value = match value {
                Value::Sequence(items) if top_level && key == ARGUMENT_HINT_FIELD => {
                    flatten_hint(items)
                }
                Value::Mapping(nested) => Value::Mapping(clean_mapping(nested, false)),
                other => other.clone(),
            };
            (key, value)
        })
        .collect()
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        _ => false,
    }
}

fn flatten_hint(items: &[Value]) -> Value {
    let parts: Vec<String> = items.iter().map(stringify).collect();
    Value::String(format!("[{}]", parts.join(", ")))
}
