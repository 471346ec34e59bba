//! Reader for the `[Group]` / `Key[locale]=value` format used by desktop
//! entries and icon theme indexes.

use std::{collections::HashMap, fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("cannot read key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: not a key-value pair, group, or comment")]
    InvalidLine { line: usize },

    #[error("line {line}: key outside of any group")]
    KeyOutsideGroup { line: usize },

    #[error("line {line}: invalid group name")]
    InvalidGroup { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("key {key}: {value:?} is not a boolean")]
    InvalidBoolean { key: String, value: String },
}

/// Keys of one group, keyed by the full key including any `[locale]` suffix.
/// Values stay as raw bytes; only the ones read back must be UTF-8.
type Group = HashMap<String, Vec<u8>>;

#[derive(Debug, Default)]
pub struct KeyFile {
    groups: HashMap<String, Group>,
}

impl KeyFile {
    pub fn load(path: &Path) -> Result<Self, KeyFileError> {
        let data = fs::read(path)?;
        Self::parse_bytes(&data)
    }

    #[cfg(test)]
    pub fn parse(data: &str) -> Result<Self, KeyFileError> {
        Self::parse_bytes(data.as_bytes())
    }

    fn parse_bytes(data: &[u8]) -> Result<Self, KeyFileError> {
        let mut groups: HashMap<String, Group> = HashMap::new();
        let mut current: Option<String> = None;

        for (idx, raw_line) in data.split(|&b| b == b'\n').enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_ascii();

            if line.is_empty() || line.starts_with(b"#") {
                continue;
            }

            if let Some(rest) = line.strip_prefix(b"[") {
                let Some(name) = rest.strip_suffix(b"]") else {
                    return Err(KeyFileError::InvalidGroup { line: line_no });
                };
                if name.is_empty() || name.contains(&b'[') || name.contains(&b']') {
                    return Err(KeyFileError::InvalidGroup { line: line_no });
                }
                let name = String::from_utf8_lossy(name).into_owned();
                groups.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(eq) = line.iter().position(|&b| b == b'=') else {
                return Err(KeyFileError::InvalidLine { line: line_no });
            };
            let (key, value) = (line[..eq].trim_ascii(), line[eq + 1..].trim_ascii());

            if key.is_empty() {
                return Err(KeyFileError::EmptyKey { line: line_no });
            }

            let Some(group) = current.as_ref() else {
                return Err(KeyFileError::KeyOutsideGroup { line: line_no });
            };

            groups
                .entry(group.clone())
                .or_default()
                .insert(String::from_utf8_lossy(key).into_owned(), value.to_vec());
        }

        Ok(Self { groups })
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Value with `\s \n \t \r \\` escapes decoded. Non-UTF-8 values read as absent.
    pub fn string(&self, group: &str, key: &str) -> Option<String> {
        self.raw(group, key).map(unescape_value)
    }

    /// `Ok(None)` when the key is absent.
    pub fn boolean(&self, group: &str, key: &str) -> Result<Option<bool>, KeyFileError> {
        let Some(v) = self.raw(group, key) else {
            return Ok(None);
        };
        parse_bool(v)
            .map(Some)
            .ok_or_else(|| KeyFileError::InvalidBoolean {
                key: key.to_string(),
                value: v.to_string(),
            })
    }

    /// First readable `Key[locale]` following `prefs`, else the untagged `Key`.
    pub fn locale_string(&self, group: &str, key: &str, prefs: &[String]) -> Option<String> {
        prefs
            .iter()
            .find_map(|loc| self.string(group, &format!("{key}[{loc}]")))
            .or_else(|| self.string(group, key))
    }

    fn raw(&self, group: &str, key: &str) -> Option<&str> {
        let bytes = self.groups.get(group)?.get(key)?;
        std::str::from_utf8(bytes).ok()
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn unescape_value(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    let mut chars = v.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            // Unknown escapes (e.g. `\;` in lists) are kept for the caller.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
