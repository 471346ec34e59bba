use log::debug;
use std::path::{Path, PathBuf};

pub const DEFAULT_ICON_SIZE: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupFlags {
    /// Allow fallback icons that live outside any theme.
    pub use_builtin: bool,
}

/// Result of a theme lookup. A match does not always have a file behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconInfo {
    pub filename: Option<PathBuf>,
}

/// Icon-theme lookup service: symbolic name + size to best match.
pub trait IconLookup {
    fn lookup_icon(&self, name: &str, size: u32, flags: LookupFlags) -> Option<IconInfo>;
}

/// Turn a desktop entry's `Icon=` value into a concrete path.
///
/// Absolute paths are returned as-is without checking they exist; anything
/// else goes through `lookup`.
pub fn resolve_icon(icon: Option<&str>, lookup: &dyn IconLookup, size: u32) -> Option<PathBuf> {
    let icon = icon?;

    if Path::new(icon).is_absolute() {
        return Some(PathBuf::from(icon));
    }

    let flags = LookupFlags { use_builtin: true };
    match lookup.lookup_icon(icon, size, flags) {
        Some(IconInfo {
            filename: Some(path),
        }) => Some(path),
        Some(IconInfo { filename: None }) => {
            debug!("icon {icon:?} matched without a backing file");
            None
        }
        None => {
            debug!("icon {icon:?} not found in theme");
            None
        }
    }
}
