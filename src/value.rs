//! Frontmatter value model.
//!
//! [`Value`] is the closed set of kinds a frontmatter field may hold, and
//! [`FrontmatterDocument`] is an insertion-ordered string-keyed mapping of
//! them. Field order matters: non-standard fields are emitted in the order
//! they appear in the document, so the mapping keeps entries in a `Vec`
//! rather than a hash map.
//!
//! Conversion from parsed YAML ([`Value::from_yaml`]) is where the
//! serialization invariant is enforced. Tagged YAML nodes and non-scalar keys
//! have no representation here and are rejected with
//! [`CompileError::SerializationInvariantViolation`].

use serde_yaml::Number;

use crate::core::CompileError;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Declared but without a value. Never produced by YAML parsing, only by
    /// programmatically assembled documents. Serializers omit these fields.
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(FrontmatterDocument),
}

impl Value {
    /// Truthiness used by conditional blocks.
    ///
    /// `false`, `0`, `NaN`, the empty string, `null` and undefined are falsy.
    /// Everything else, including empty sequences and mappings, is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(_) | Value::Mapping(_) => true,
        }
    }

    /// Short name of the value's kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a parsed YAML node, enforcing the permitted value kinds.
    ///
    /// `path` is the dotted location of the node and only used for error
    /// messages.
    pub fn from_yaml(value: serde_yaml::Value, path: &str) -> Result<Self, CompileError> {
        match value {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_yaml::Value::Number(n) => Ok(Value::Number(n)),
            serde_yaml::Value::String(s) => Ok(Value::String(s)),
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Value::from_yaml(item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            serde_yaml::Value::Mapping(mapping) => {
                FrontmatterDocument::from_yaml_mapping(mapping, path).map(Value::Mapping)
            }
            serde_yaml::Value::Tagged(tagged) => {
                Err(CompileError::SerializationInvariantViolation {
                    path: path.to_string(),
                    kind: format!("tagged value ({})", tagged.tag),
                })
            }
        }
    }

    /// Convert back to a YAML node. Undefined values become `null`.
    #[must_use]
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Value::Undefined | Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Number(n) => serde_yaml::Value::Number(n.clone()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_yaml::Value::Sequence(items.iter().map(Value::to_yaml).collect())
            }
            Value::Mapping(doc) => serde_yaml::Value::Mapping(doc.to_yaml_mapping()),
        }
    }

    /// Canonical machine-readable form (JSON) of the value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Mapping(doc) => serde_json::Value::Object(
                doc.iter()
                    .filter(|(_, v)| !matches!(v, Value::Undefined))
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(n: &Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        serde_json::Value::from(i)
    } else if let Some(u) = n.as_u64() {
        serde_json::Value::from(u)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::from(n as u64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<FrontmatterDocument> for Value {
    fn from(doc: FrontmatterDocument) -> Self {
        Value::Mapping(doc)
    }
}

/// Insertion-ordered mapping from field name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontmatterDocument {
    entries: Vec<(String, Value)>,
}

impl FrontmatterDocument {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field. An existing field keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert a parsed YAML mapping.
    ///
    /// String keys are taken as-is. Number and boolean keys are converted to
    /// their text form; any other key kind violates the string-key invariant.
    pub fn from_yaml_mapping(
        mapping: serde_yaml::Mapping,
        path: &str,
    ) -> Result<Self, CompileError> {
        let mut doc = Self::new();
        for (key, value) in mapping {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(CompileError::SerializationInvariantViolation {
                        path: path.to_string(),
                        kind: format!("non-string mapping key ({})", yaml_kind(&other)),
                    });
                }
            };
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            let value = Value::from_yaml(value, &child_path)?;
            doc.insert(key, value);
        }
        Ok(doc)
    }

    /// Convert to a YAML mapping, skipping undefined fields.
    #[must_use]
    pub fn to_yaml_mapping(&self) -> serde_yaml::Mapping {
        self.entries
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Undefined))
            .map(|(k, v)| (serde_yaml::Value::String(k.clone()), v.to_yaml()))
            .collect()
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FrontmatterDocument {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl IntoIterator for FrontmatterDocument {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
