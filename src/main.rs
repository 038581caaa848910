mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod form;
mod output;
mod store;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);

    if let Err(e) = app::run(&cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
