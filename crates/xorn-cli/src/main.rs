use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    init_tracing(&config, cli.verbose);
    if !config.color {
        colored::control::set_override(false);
    }
    commands::run_command(cli, &config)
}

/// `RUST_LOG` wins over the configured filter; `--verbose` wins over both.
fn init_tracing(config: &config::CliConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
