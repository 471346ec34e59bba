use crate::desktop::{ParseContext, parse_desktop_file};
use crate::models::AppEntry;
use log::debug;
use std::path::PathBuf;
use walkdir::WalkDir;

const SUFFIX: &str = ".desktop";

/// Parse every `*.desktop` file directly inside each of `dirs`.
///
/// Directories are visited in order; files in whatever order the filesystem
/// lists them. Unopenable directories and skipped files contribute nothing.
pub fn scan_applications(dirs: &[PathBuf], ctx: &ParseContext<'_>) -> Vec<AppEntry> {
    let mut entries = Vec::new();

    for dir in dirs {
        let mut found = 0usize;
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);

        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    debug!("{}: {e}", dir.display());
                    continue;
                }
            };

            // Case-sensitive suffix match on the raw name bytes, nothing else.
            let is_desktop = item
                .file_name()
                .as_encoded_bytes()
                .ends_with(SUFFIX.as_bytes());
            if !is_desktop {
                continue;
            }

            found += 1;
            let path = item.path();
            match parse_desktop_file(path, ctx) {
                Ok(entry) => entries.push(entry),
                Err(reason) => debug!("skip {}: {reason}", path.display()),
            }
        }

        debug!("{}: {found} desktop files", dir.display());
    }

    entries
}
