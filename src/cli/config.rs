//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::defaults::API_KEY_ENV;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "location.provider")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            if key == "geocoder.api_key" {
                println!("{} = \"***\"", key);
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[geocoder]");
    println!("base_url = \"{}\"", config.geocoder.base_url);
    if config.geocoder.api_key.is_empty() {
        println!("api_key = \"\" # not configured");
    } else {
        println!("api_key = \"***\" # configured");
    }
    if std::env::var(API_KEY_ENV).is_ok_and(|key| !key.trim().is_empty()) {
        println!("# {} is set and takes precedence", API_KEY_ENV);
    }
    println!();

    println!("[location]");
    println!("provider = \"{}\"", config.location.provider);
    println!("high_accuracy = {}", config.location.high_accuracy);
    println!("timeout_ms = {}", config.location.timeout_ms);
    println!("maximum_age_ms = {}", config.location.maximum_age_ms);
    println!("latitude = {}", config.location.latitude);
    println!("longitude = {}", config.location.longitude);
    println!("ip_api_url = \"{}\"", config.location.ip_api_url);
    println!();

    println!("[screen]");
    println!(
        "discard_stale_responses = {}",
        config.screen.discard_stale_responses
    );
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
}
