//! Tidytab CLI - clean tabular data from the command line or over HTTP.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. RUST_LOG wins over the command-line level.
fn init_logging(level: &str, verbose: bool) {
    let effective_level = if verbose { "debug" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            report,
            delimiter,
            json,
            dry_run,
        } => commands::clean::run(commands::clean::CleanArgs {
            file,
            output,
            report,
            delimiter,
            json,
            dry_run,
        }),

        Commands::Serve {
            host,
            port,
            output_dir,
            max_upload_bytes,
            open,
        } => commands::serve::run(
            server::ServerConfig {
                host,
                port,
                output_dir,
                max_upload_bytes,
            },
            open,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
