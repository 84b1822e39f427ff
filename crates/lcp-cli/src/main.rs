//! LCP CLI - Main entry point

use clap::Parser;
use lcp_cli::{Cli, Commands};
use lcp_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("lcp-cli".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("lcp-cli".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // The CLI should work even when logging cannot be set up.
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> lcp_cli::Result<()> {
    match cli.command {
        Commands::Import { ref file, check } => {
            lcp_cli::commands::import::run(cli.server_url, cli.token, file, check).await
        },

        Commands::Export { ref output } => {
            lcp_cli::commands::export::run(cli.server_url, cli.token, output.as_deref()).await
        },

        Commands::Template { ref output } => {
            lcp_cli::commands::template::run(cli.server_url, cli.token, output.as_deref()).await
        },

        Commands::Status => lcp_cli::commands::status::run(cli.server_url).await,
    }
}
