use crate::models::AppEntry;
use std::fmt::Write as _;

/// Escape `input` so it can sit between the quotes of a JSON string literal.
///
/// `None` is treated like the empty string.
pub fn escape_json(input: Option<&str>) -> String {
    let Some(s) = input else {
        return String::new();
    };

    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Writing into a String cannot fail.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render the fixed two-space layout consumers compare byte-for-byte.
///
/// An empty slice yields `[\n\n]\n`.
pub fn render_pretty(entries: &[AppEntry]) -> String {
    let body = entries
        .iter()
        .map(render_object)
        .collect::<Vec<_>>()
        .join(",\n");

    format!("[\n{body}\n]\n")
}

fn render_object(entry: &AppEntry) -> String {
    format!(
        "  {{\n    \"name\": \"{}\",\n    \"exec\": \"{}\",\n    \"description\": \"{}\",\n    \"icon_path\": \"{}\"\n  }}",
        escape_json(Some(&entry.name)),
        escape_json(Some(&entry.exec)),
        escape_json(Some(&entry.description)),
        escape_json(Some(&entry.icon_path)),
    )
}

/// Single-line rendering for consumers that only care about JSON semantics.
pub fn render_compact(entries: &[AppEntry]) -> serde_json::Result<String> {
    let mut s = serde_json::to_string(entries)?;
    s.push('\n');
    Ok(s)
}
