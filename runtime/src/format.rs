//! Output rendering for command return values.
//!
//! [`format_value`] turns an arbitrary [`Value`] into terminal text. In
//! [`FormatMode::Auto`] the renderer is chosen from the value's shape:
//! scalars print directly, short scalar sequences join on one line, longer
//! ones go one-per-line, sequences of same-keyed mappings become an aligned
//! table, shallow mappings become `key = value` lines, and deeper
//! structures become an indented tree. Explicit modes force a renderer
//! regardless of shape.
//!
//! Formatting is pure: the same value and mode always produce the same
//! text, and nothing is written anywhere.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Longest scalar sequence rendered inline on a single line.
pub const SHORT_SEQUENCE_MAX: usize = 10;

/// Mappings with at least this many entries render as a tree even when
/// flat.
pub const FLAT_MAP_MAX_ENTRIES: usize = 10;

/// Indent unit for tree rendering.
const INDENT: &str = "  ";

/// Rendering mode for command return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FormatMode {
    /// Shape-driven renderer selection (the default).
    #[default]
    Auto,
    /// Order-preserving pretty-printed JSON.
    Json,
    /// Aligned column table.
    Table,
    /// Indented tree.
    Tree,
    /// Compact single-line text.
    Plain,
    /// Indented generic text.
    Pretty,
}

impl FormatMode {
    /// The lowercase mode name as typed by users.
    pub fn name(&self) -> &'static str {
        match self {
            FormatMode::Auto => "auto",
            FormatMode::Json => "json",
            FormatMode::Table => "table",
            FormatMode::Tree => "tree",
            FormatMode::Plain => "plain",
            FormatMode::Pretty => "pretty",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mode name that is not one of `auto|json|table|tree|plain|pretty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format mode {0:?} (expected auto, json, table, tree, plain, or pretty)")]
pub struct UnknownFormatMode(pub String);

impl FromStr for FormatMode {
    type Err = UnknownFormatMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FormatMode::Auto),
            "json" => Ok(FormatMode::Json),
            "table" => Ok(FormatMode::Table),
            "tree" => Ok(FormatMode::Tree),
            "plain" => Ok(FormatMode::Plain),
            "pretty" => Ok(FormatMode::Pretty),
            other => Err(UnknownFormatMode(other.to_string())),
        }
    }
}

/// Renders a value in the requested mode.
///
/// An absent value (`Null`) renders as the empty string in every mode, and
/// scalars always print directly; the mode decides how containers render.
///
/// # Examples
///
/// ```
/// use cmdshell_runtime::{FormatMode, format_value};
/// use serde_json::json;
///
/// assert_eq!(format_value(&json!(5), FormatMode::Auto), "5");
/// assert_eq!(format_value(&json!(null), FormatMode::Auto), "");
/// assert_eq!(
///     format_value(&json!(["apple", "banana"]), FormatMode::Auto),
///     "apple, banana",
/// );
/// ```
pub fn format_value(value: &Value, mode: FormatMode) -> String {
    if value.is_null() {
        return String::new();
    }
    if let Some(text) = scalar_text(value) {
        return text;
    }
    match mode {
        FormatMode::Auto => format_auto(value),
        FormatMode::Json | FormatMode::Pretty => pretty_json(value),
        FormatMode::Table => format_table(value),
        FormatMode::Tree => render_tree(value),
        FormatMode::Plain => compact_json(value),
    }
}

fn format_auto(value: &Value) -> String {
    match value {
        Value::Array(items) if items.iter().all(is_scalar) => {
            let texts: Vec<String> = items.iter().map(cell_text).collect();
            if texts.len() <= SHORT_SEQUENCE_MAX {
                texts.join(", ")
            } else {
                texts.join("\n")
            }
        }
        Value::Array(items) => match shared_key_set(items) {
            Some(keys) => render_table(items, &keys),
            None => pretty_json(value),
        },
        Value::Object(entries) => {
            if container_depth(value) <= 1 && entries.len() < FLAT_MAP_MAX_ENTRIES {
                entries
                    .iter()
                    .map(|(key, val)| format!("{key} = {}", cell_text(val)))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                render_tree(value)
            }
        }
        _ => pretty_json(value),
    }
}

/// Forced table rendering. A single mapping becomes a one-row table;
/// heterogeneous rows use the first-seen key union with empty cells for
/// missing values. Shapes with no tabular reading fall back to the generic
/// renderer.
fn format_table(value: &Value) -> String {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            let mut keys: Vec<&str> = Vec::new();
            for item in items {
                if let Some(entries) = item.as_object() {
                    for key in entries.keys() {
                        if !keys.contains(&key.as_str()) {
                            keys.push(key);
                        }
                    }
                }
            }
            render_table(items, &keys)
        }
        Value::Object(_) => render_table(std::slice::from_ref(value), &object_keys(value)),
        _ => pretty_json(value),
    }
}

fn object_keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .map(|entries| entries.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Key set shared by every row, in first-row declaration order; `None`
/// when the rows have no single tabular shape.
fn shared_key_set(items: &[Value]) -> Option<Vec<&str>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    for item in items {
        let entries = item.as_object()?;
        if entries.len() != keys.len() || !keys.iter().all(|key| entries.contains_key(*key)) {
            return None;
        }
    }
    Some(keys)
}

fn render_table(rows: &[Value], keys: &[&str]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            keys.iter()
                .map(|key| row.get(*key).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = keys.iter().map(|key| key.chars().count()).collect();
    for row in &cells {
        for (column, cell) in row.iter().enumerate() {
            widths[column] = widths[column].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(table_line(
        &keys.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
        &widths,
    ));
    for row in &cells {
        lines.push(table_line(row, &widths));
    }
    lines.join("\n")
}

/// One table line: cells left-aligned to their column width, single space
/// between columns, last column unpadded.
fn table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (column, cell) in cells.iter().enumerate() {
        if column + 1 == cells.len() {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:<width$} ", cell, width = widths[column]));
        }
    }
    line
}

fn render_tree(value: &Value) -> String {
    let mut lines = Vec::new();
    tree_lines(value, 0, &mut lines);
    lines.join("\n")
}

fn tree_lines(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Object(entries) => {
            for (key, val) in entries {
                if is_leaf(val) {
                    lines.push(format!("{indent}{key}: {}", cell_text(val)));
                } else {
                    lines.push(format!("{indent}{key}:"));
                    tree_lines(val, depth + 1, lines);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_leaf(item) {
                    lines.push(format!("{indent}- {}", cell_text(item)));
                } else {
                    lines.push(format!("{indent}-"));
                    tree_lines(item, depth + 1, lines);
                }
            }
        }
        other => lines.push(format!("{indent}{}", cell_text(other))),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_) | Value::Number(_) | Value::Bool(_)
    )
}

fn is_leaf(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Direct text for a scalar; `None` for null and containers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Cell/leaf text: scalar text, or compact JSON for anything else.
fn cell_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| compact_json(value))
}

/// Nesting depth counting container levels only; scalars are depth zero.
fn container_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(container_depth).max().unwrap_or(0),
        Value::Object(entries) => 1 + entries.values().map(container_depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn compact_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("serialization failed: {e}"))
}
