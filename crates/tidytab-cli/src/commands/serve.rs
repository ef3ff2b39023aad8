//! Serve command - run the upload server.

use colored::Colorize;

use crate::server::{app, ServerConfig};

pub fn run(config: ServerConfig, open_browser: bool) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.output_dir)?;

    let url = format!("http://{}:{}", config.host, config.port);
    println!();
    println!(
        "{} {}",
        "Starting tidytab server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Outputs: {}", config.output_dir.display());
    println!(
        "  Upload limit: {} MiB",
        config.max_upload_bytes / (1024 * 1024)
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(config))
}
