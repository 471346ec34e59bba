mod app;
mod cli;
mod desktop;
mod icon_theme;
mod icons;
mod json;
mod keyfile;
mod locale;
mod models;
mod output;
mod scan;
mod xdg;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let code = app::run(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
