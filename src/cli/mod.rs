//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod screen;
pub mod search;
pub mod serve;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use crate::geo::{get_geocoder, OpenCageClient};
use crate::location::Provider;
use crate::screen::LocationScreen;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Where am I, and where is that?
#[derive(Parser)]
#[command(name = "placefinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive location screen
    Screen(screen::ScreenArgs),

    /// Print the current location and place name
    Locate(locate::LocateArgs),

    /// Look up a place by name
    Search(search::SearchArgs),

    /// Serve the location screen over HTTP (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen(args) => screen::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build an unmounted screen from config
pub fn build_screen(config: &Config) -> Result<LocationScreen<Provider, OpenCageClient>> {
    let api_key = config.require_api_key()?;
    let provider = Provider::from_config(&config.location)?;
    let geocoder = get_geocoder(&config.geocoder, api_key);
    Ok(LocationScreen::from_config(
        Arc::new(provider),
        Arc::new(geocoder),
        config,
    ))
}

/// Resolve a `--format` value
pub fn formatter(name: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(name).ok_or_else(|| Error::Config(format!("Unknown format: {}", name)))
}

/// Print available output formats
pub fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::try_parse_from(["placefinder", "search", "New", "York", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query(), "New York");
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_unknown_format() {
        assert!(formatter("gpx").is_err());
        assert!(formatter("text").is_ok());
    }
}
