//! XDG icon theme lookup backing [`IconLookup`] outside of tests.

use crate::icons::{IconInfo, IconLookup, LookupFlags};
use crate::keyfile::KeyFile;
use crate::xdg;
use log::debug;
use std::{
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
};

const FALLBACK_THEME: &str = "hicolor";
const EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirKind {
    Fixed,
    Scalable,
    Threshold,
}

#[derive(Debug, Clone)]
struct ThemeDir {
    subdir: String,
    size: i64,
    scale: i64,
    kind: DirKind,
    min_size: i64,
    max_size: i64,
    threshold: i64,
}

impl ThemeDir {
    fn matches_size(&self, size: i64, scale: i64) -> bool {
        if self.scale != scale {
            return false;
        }
        match self.kind {
            DirKind::Fixed => self.size == size,
            DirKind::Scalable => self.min_size <= size && size <= self.max_size,
            DirKind::Threshold => {
                self.size - self.threshold <= size && size <= self.size + self.threshold
            }
        }
    }

    fn size_distance(&self, size: i64, scale: i64) -> i64 {
        let want = size * scale;
        match self.kind {
            DirKind::Fixed => (self.size * self.scale - want).abs(),
            DirKind::Scalable => {
                if want < self.min_size * self.scale {
                    self.min_size * self.scale - want
                } else if want > self.max_size * self.scale {
                    want - self.max_size * self.scale
                } else {
                    0
                }
            }
            DirKind::Threshold => {
                if want < (self.size - self.threshold) * self.scale {
                    self.min_size * self.scale - want
                } else if want > (self.size + self.threshold) * self.scale {
                    want - self.max_size * self.scale
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug)]
struct Theme {
    name: String,
    /// `<base>/<name>` for every base dir that has this theme.
    roots: Vec<PathBuf>,
    dirs: Vec<ThemeDir>,
    inherits: Vec<String>,
}

/// Icon lookup over a theme, its `Inherits` chain, `hicolor`, and finally
/// unthemed icons in the base directories.
#[derive(Debug)]
pub struct ThemeIconLookup {
    base_dirs: Vec<PathBuf>,
    themes: Vec<Theme>,
}

impl ThemeIconLookup {
    /// Theme comes from `theme_override`, else the GTK settings, else hicolor.
    pub fn from_env(theme_override: Option<&str>) -> Self {
        let theme = theme_override
            .map(str::to_string)
            .or_else(gtk_icon_theme_name)
            .unwrap_or_else(|| FALLBACK_THEME.to_string());
        Self::new(xdg::icon_base_dirs(), &theme)
    }

    pub fn new(base_dirs: Vec<PathBuf>, theme: &str) -> Self {
        let themes = load_theme_chain(&base_dirs, theme);
        debug!(
            "icon themes: {:?}",
            themes.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );
        Self { base_dirs, themes }
    }

    fn lookup_in_theme(&self, theme: &Theme, name: &str, size: i64) -> Option<PathBuf> {
        for dir in theme.dirs.iter().filter(|d| d.matches_size(size, 1)) {
            if let Some(p) = find_file(&theme.roots, &dir.subdir, name) {
                return Some(p);
            }
        }

        let mut best: Option<(i64, PathBuf)> = None;
        for dir in &theme.dirs {
            let distance = dir.size_distance(size, 1);
            if best.as_ref().is_some_and(|(d, _)| distance >= *d) {
                continue;
            }
            if let Some(p) = find_file(&theme.roots, &dir.subdir, name) {
                best = Some((distance, p));
            }
        }
        best.map(|(_, p)| p)
    }

    fn lookup_unthemed(&self, name: &str) -> Option<PathBuf> {
        self.base_dirs.iter().find_map(|base| {
            EXTENSIONS
                .iter()
                .map(|ext| base.join(format!("{name}.{ext}")))
                .find(|p| p.is_file())
        })
    }
}

impl IconLookup for ThemeIconLookup {
    fn lookup_icon(&self, name: &str, size: u32, flags: LookupFlags) -> Option<IconInfo> {
        if name.is_empty() {
            return None;
        }
        let size = i64::from(size);

        let found = self
            .themes
            .iter()
            .find_map(|theme| self.lookup_in_theme(theme, name, size))
            .or_else(|| {
                if flags.use_builtin {
                    self.lookup_unthemed(name)
                } else {
                    None
                }
            })?;

        Some(IconInfo {
            filename: Some(found),
        })
    }
}

fn find_file(roots: &[PathBuf], subdir: &str, name: &str) -> Option<PathBuf> {
    roots.iter().find_map(|root| {
        EXTENSIONS
            .iter()
            .map(|ext| root.join(subdir).join(format!("{name}.{ext}")))
            .find(|p| p.is_file())
    })
}

fn load_theme_chain(base_dirs: &[PathBuf], start: &str) -> Vec<Theme> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start.to_string()]);

    loop {
        let Some(name) = queue.pop_front() else {
            if visited.contains(FALLBACK_THEME) {
                break;
            }
            // hicolor always ends the chain
            queue.push_back(FALLBACK_THEME.to_string());
            continue;
        };
        if !visited.insert(name.clone()) {
            continue;
        }

        let Some(theme) = load_theme(base_dirs, &name) else {
            debug!("icon theme {name:?} has no index.theme");
            continue;
        };
        queue.extend(
            theme
                .inherits
                .iter()
                .filter(|parent| !visited.contains(*parent))
                .cloned(),
        );
        out.push(theme);
    }

    out
}

fn load_theme(base_dirs: &[PathBuf], name: &str) -> Option<Theme> {
    let roots: Vec<PathBuf> = base_dirs
        .iter()
        .map(|b| b.join(name))
        .filter(|p| p.is_dir())
        .collect();

    let index = roots.iter().find_map(|r| {
        let path = r.join("index.theme");
        match KeyFile::load(&path) {
            Ok(kf) => Some(kf),
            Err(e) => {
                if path.exists() {
                    debug!("skipping {}: {e}", path.display());
                }
                None
            }
        }
    })?;

    let list = |key: &str| -> Vec<String> {
        index
            .string("Icon Theme", key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut subdirs = list("Directories");
    subdirs.extend(list("ScaledDirectories"));
    let dirs = subdirs
        .iter()
        .filter_map(|sub| parse_theme_dir(&index, sub))
        .collect();

    Some(Theme {
        name: name.to_string(),
        roots,
        dirs,
        inherits: list("Inherits"),
    })
}

fn parse_theme_dir(index: &KeyFile, subdir: &str) -> Option<ThemeDir> {
    let int = |key: &str| -> Option<i64> {
        index
            .string(subdir, key)
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    let size = int("Size")?;
    let kind = match index.string(subdir, "Type").as_deref() {
        Some("Fixed") => DirKind::Fixed,
        Some("Scalable") => DirKind::Scalable,
        _ => DirKind::Threshold,
    };

    Some(ThemeDir {
        subdir: subdir.to_string(),
        size,
        scale: int("Scale").unwrap_or(1),
        kind,
        min_size: int("MinSize").unwrap_or(size),
        max_size: int("MaxSize").unwrap_or(size),
        threshold: int("Threshold").unwrap_or(2),
    })
}

/// `gtk-icon-theme-name` from `$XDG_CONFIG_HOME/gtk-3.0/settings.ini`.
fn gtk_icon_theme_name() -> Option<String> {
    let path = dirs::config_dir()?.join("gtk-3.0").join("settings.ini");
    gtk_icon_theme_name_from(&path)
}

fn gtk_icon_theme_name_from(path: &Path) -> Option<String> {
    let settings = KeyFile::load(path).ok()?;
    settings
        .string("Settings", "gtk-icon-theme-name")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
