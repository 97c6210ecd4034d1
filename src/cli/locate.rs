//! Locate command handler
//!
//! Mounts the screen once, waits for it to settle and prints it.

use crate::cli::{build_screen, formatter, init_logging, list_formats};
use crate::config::Config;
use crate::error::Result;
use crate::screen::Action;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let config = Config::load()?;
    let formatter = formatter(&args.format)?;
    let mut screen = build_screen(&config)?;

    screen.dispatch(Action::Mount);
    screen.settle().await;

    print!("{}", formatter.format(screen.state())?);

    if screen.state().error_message.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
