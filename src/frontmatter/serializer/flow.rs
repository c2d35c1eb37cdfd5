//! Flow-style dialect (Copilot, Codex).

use super::{ArrayStyle, FrontmatterSerializer, inline_value};
use crate::value::Value;

/// Writes sequences on one line with single-quoted string items:
///
/// ```text
/// tools: ['read', 'execute']
/// ```
///
/// Numbers and booleans inside the brackets stay unquoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowSerializer;

impl FrontmatterSerializer for FlowSerializer {
    fn style(&self) -> ArrayStyle {
        ArrayStyle::Flow
    }

    fn write_sequence(&self, lines: &mut Vec<String>, indent: usize, key: &str, items: &[Value]) {
        let pad = " ".repeat(indent);
        let items: Vec<String> = items.iter().map(inline_value).collect();
        lines.push(format!("{pad}{key}: [{}]", items.join(", ")));
    }
}
