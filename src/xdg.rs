use std::{
    env,
    path::{Path, PathBuf},
};

pub const DEFAULT_DATA_DIRS: &str = "/usr/local/share/:/usr/share/";

/// Directories to scan, in order: every `XDG_DATA_DIRS` entry, the user's
/// `~/.local/share/applications`, then the comma-separated `extra` paths.
pub fn app_dirs_from_env(extra: Option<&str>) -> Vec<PathBuf> {
    let data_dirs = env::var("XDG_DATA_DIRS").ok();
    let home = dirs::home_dir();
    build_app_dirs(data_dirs.as_deref(), home.as_deref(), extra)
}

/// Duplicates are kept and nothing is checked for existence; unopenable
/// directories are skipped by the scanner.
pub fn build_app_dirs(
    data_dirs: Option<&str>,
    home: Option<&Path>,
    extra: Option<&str>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::<PathBuf>::new();

    // An empty list has no segments; empty segments inside a list are kept.
    let data_dirs = data_dirs.unwrap_or(DEFAULT_DATA_DIRS);
    if !data_dirs.is_empty() {
        for part in data_dirs.split(':') {
            dirs.push(PathBuf::from(part).join("applications"));
        }
    }

    let home = home.map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
    dirs.push(home.join(".local/share/applications"));

    if let Some(extra) = extra {
        dirs.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        );
    }

    dirs
}

/// Roots searched for icon themes and unthemed icons, highest priority first.
pub fn icon_base_dirs() -> Vec<PathBuf> {
    let data_dirs = env::var("XDG_DATA_DIRS").ok();
    let home = dirs::home_dir();
    let data_home = dirs::data_dir();
    build_icon_base_dirs(data_dirs.as_deref(), home.as_deref(), data_home.as_deref())
}

fn build_icon_base_dirs(
    data_dirs: Option<&str>,
    home: Option<&Path>,
    data_home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(home) = home {
        dirs.push(home.join(".icons"));
    }
    // XDG_DATA_HOME (default ~/.local/share)
    match (data_home, home) {
        (Some(dh), _) => dirs.push(dh.join("icons")),
        (None, Some(h)) => dirs.push(h.join(".local/share/icons")),
        (None, None) => {}
    }

    for part in data_dirs
        .unwrap_or(DEFAULT_DATA_DIRS)
        .split(':')
        .filter(|s| !s.is_empty())
    {
        dirs.push(PathBuf::from(part).join("icons"));
    }

    dirs.push(PathBuf::from("/usr/share/pixmaps"));
    dirs
}
