use crate::cli::Cli;
use crate::desktop::ParseContext;
use crate::icon_theme::ThemeIconLookup;
use crate::models::AppEntry;
use crate::{json, locale, output, scan, xdg};
use log::{LevelFilter, debug, error};

pub fn run(cli: Cli) -> i32 {
    init_logging(cli.verbose);

    let icons = ThemeIconLookup::from_env(cli.icon_theme.as_deref());
    let dirs = xdg::app_dirs_from_env(cli.extra_dirs.as_deref());
    debug!("scan dirs: {dirs:?}");

    let ctx = ParseContext {
        icons: &icons,
        icon_size: cli.icon_size,
        locales: locale::language_names(),
    };

    let mut entries = scan::scan_applications(&dirs, &ctx);
    if let Some(filter) = cli.filter.as_deref() {
        entries = filter_by_name(entries, filter);
    }
    debug!("{} applications", entries.len());

    let doc = render(&entries, cli.compact);
    if let Err(e) = output::write_stdout(&doc) {
        error!("writing output: {e}");
    }

    // Nothing above is treated as a failure.
    0
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    };
    // RUST_LOG can still turn diagnostics on without -v.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn render(entries: &[AppEntry], compact: bool) -> String {
    if compact {
        match json::render_compact(entries) {
            Ok(s) => return s,
            Err(e) => error!("compact rendering failed, using pretty layout: {e}"),
        }
    }
    json::render_pretty(entries)
}

/// Keep entries whose name case-insensitively equals one of the
/// comma-separated `filter` names. An empty filter keeps everything.
fn filter_by_name(entries: Vec<AppEntry>, filter: &str) -> Vec<AppEntry> {
    let wanted: Vec<String> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect();

    if wanted.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|e| wanted.contains(&e.name.to_lowercase()))
        .collect()
}
