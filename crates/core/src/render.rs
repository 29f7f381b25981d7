//! Fixed-width rendering of reports.
//!
//! Every string leaf is wrapped to a line width before the report is
//! pretty-printed, so long descriptions and link texts stay readable in a
//! terminal. Rendering never modifies the report it is given.

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Default line width for wrapped strings.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Wraps `text` to lines of at most `width` characters joined by `\n`.
///
/// Runs of whitespace collapse to one space. Only whitespace separates words:
/// hyphens are not break points, so a hyphenated word or URL that fits stays
/// whole and one that does not is split at the width like any overlong word.
/// A width of 0 disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_length = 0;

    for word in text.split_whitespace() {
        let mut word = word;

        loop {
            let word_len = word.chars().count();
            let separator = usize::from(current_length > 0);

            if current_length + separator + word_len <= width {
                if separator == 1 {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                current_length += separator + word_len;
                break;
            }

            if word_len <= width {
                lines.push(std::mem::take(&mut current_line));
                current_length = 0;
                continue;
            }

            // Fill what is left of the line with the head of an overlong word.
            let space_left = width.saturating_sub(current_length + separator);
            if space_left == 0 {
                lines.push(std::mem::take(&mut current_line));
                current_length = 0;
                continue;
            }

            let split_at = word.char_indices().nth(space_left).map_or(word.len(), |(idx, _)| idx);
            if separator == 1 {
                current_line.push(' ');
            }
            current_line.push_str(&word[..split_at]);
            lines.push(std::mem::take(&mut current_line));
            current_length = 0;
            word = &word[split_at..];
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

/// Returns a copy of `value` with every string leaf wrapped to `width`.
///
/// Object keys, key order and array order are preserved.
pub fn wrap_strings(value: &Value, width: usize) -> Value {
    match value {
        Value::String(s) => Value::String(wrap_text(s, width)),
        Value::Array(items) => Value::Array(items.iter().map(|item| wrap_strings(item, width)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), wrap_strings(item, width)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Wraps a report's strings and pretty-prints it with two-space indentation.
pub fn render_report<T: Serialize>(report: &T, width: usize) -> Result<String> {
    let value = serde_json::to_value(report)?;
    Ok(serde_json::to_string_pretty(&wrap_strings(&value, width))?)
}
