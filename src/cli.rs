use clap::Parser;

use crate::icons::DEFAULT_ICON_SIZE;

#[derive(Parser, Debug)]
#[command(name = "list-apps")]
#[command(about = "List installed desktop applications as JSON", long_about = None)]
pub struct Cli {
    /// Extra directories to scan, comma-separated
    pub extra_dirs: Option<String>,

    /// Icon size to look up, in pixels
    #[arg(long, default_value_t = DEFAULT_ICON_SIZE)]
    pub icon_size: u32,

    /// Icon theme to use instead of the GTK setting
    #[arg(long)]
    pub icon_theme: Option<String>,

    /// Only keep apps with one of these names (comma-separated, case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Print the array on a single line
    #[arg(long)]
    pub compact: bool,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
