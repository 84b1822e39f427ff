//! LCP CLI library
//!
//! Catalog tooling for the LCP back-office: bulk CSV import, catalog
//! export, template generation, and a server health check. The binary is
//! `lcp`; all commands talk to a running LCP server over its HTTP API.

pub mod api;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};

/// Default LCP server URL when not specified.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Command-line catalog tooling for the LCP back-office
#[derive(Debug, Parser)]
#[command(name = "lcp", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the LCP server
    #[arg(
        long,
        global = true,
        env = "LCP_SERVER_URL",
        default_value = DEFAULT_SERVER_URL
    )]
    pub server_url: String,

    /// Admin bearer token (required for import/export)
    #[arg(long, global = true, env = "LCP_TOKEN")]
    pub token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import products from a semicolon-delimited CSV file
    Import {
        /// Path to the CSV file
        file: std::path::PathBuf,

        /// Validate the file locally without contacting the server
        #[arg(long)]
        check: bool,
    },

    /// Export the catalog as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Download an import template (header row plus a sample row)
    Template {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Check server health
    Status,
}
