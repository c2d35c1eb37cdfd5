//! Block-style dialect (Claude).

use super::{ArrayStyle, FrontmatterSerializer, INDENT, format_scalar, inline_value, is_emitted};
use crate::value::Value;

/// Writes sequences one `- item` per line:
///
/// ```text
/// tools:
///   - Read
///   - Bash
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSerializer;

impl FrontmatterSerializer for BlockSerializer {
    fn style(&self) -> ArrayStyle {
        ArrayStyle::Block
    }

    fn write_sequence(&self, lines: &mut Vec<String>, indent: usize, key: &str, items: &[Value]) {
        let pad = " ".repeat(indent);
        let item_pad = " ".repeat(indent + INDENT);
        lines.push(format!("{pad}{key}:"));

        for item in items {
            match item {
                Value::Mapping(doc) if doc.iter().any(|(_, v)| is_emitted(v)) => {
                    // First entry shares the dash line, the rest align under it.
                    let body_indent = indent + 2 * INDENT;
                    let mut entry_lines = Vec::new();
                    for (key, value) in doc.iter() {
                        self.write_entry(&mut entry_lines, body_indent, key, value);
                    }
                    for (i, line) in entry_lines.into_iter().enumerate() {
                        if i == 0 {
                            lines.push(format!("{item_pad}- {}", &line[body_indent..]));
                        } else {
                            lines.push(line);
                        }
                    }
                }
                Value::Mapping(_) => lines.push(format!("{item_pad}- {{}}")),
                Value::Sequence(_) => lines.push(format!("{item_pad}- {}", inline_value(item))),
                scalar => lines.push(format!("{item_pad}- {}", format_scalar(scalar))),
            }
        }
    }
}
