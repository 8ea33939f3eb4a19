use crate::error::{AppError, Result};
use crate::gather::Entry;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const COMMENT_GUTTER: usize = 2;
const COMMENT_MARKER: &str = "# ";
const MERMAID_HEADER: &str = "flowchart LR";

/// Root label first, then one line per entry; commented lines are aligned
/// on a shared column.
pub fn render_text(root_label: &str, entries: &[Entry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.display_text.width())
        .chain(std::iter::once(root_label.width()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(root_label);
    out.push('\n');
    for entry in entries {
        out.push_str(&entry.display_text);
        if !entry.comment.is_empty() {
            let padding = width - entry.display_text.width() + COMMENT_GUTTER;
            out.push_str(&" ".repeat(padding));
            out.push_str(COMMENT_MARKER);
            out.push_str(&entry.comment);
        }
        out.push('\n');
    }
    out
}

/// Mermaid flowchart with one node per distinct path prefix.
pub fn render_mermaid(root_label: &str, entries: &[Entry]) -> String {
    let root_id = node_id(root_label);
    let mut out = format!("{}\n", MERMAID_HEADER);
    out.push_str(&format!(
        "  {}(\"{}\")\n",
        root_id,
        escape_label(root_label)
    ));

    let mut emitted: HashSet<String> = HashSet::new();
    for entry in entries {
        let segments: Vec<&str> = entry.relative_path.split('/').collect();
        for depth in 1..=segments.len() {
            let prefix = segments[..depth].join("/");
            if emitted.contains(&prefix) {
                continue;
            }
            let parent_id = if depth == 1 {
                root_id.clone()
            } else {
                node_id(&segments[..depth - 1].join("/"))
            };
            let mut label = segments[depth - 1].to_string();
            if depth == segments.len() && entry.is_dir {
                label.push('/');
            }
            out.push_str(&format!(
                "  {} --> {}(\"{}\")\n",
                parent_id,
                node_id(&prefix),
                escape_label(&label)
            ));
            emitted.insert(prefix);
        }
    }
    out
}

/// Mermaid-safe identifier: every non-alphanumeric character becomes `_`.
pub fn node_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

pub fn serialize_to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(AppError::JsonSerialize)
}

/// Writes `content`, creating parent directories first.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
