//! Search command handler
//!
//! Types a place name into a fresh screen, submits it and prints the result.

use crate::cli::{build_screen, formatter, init_logging, list_formats};
use crate::config::Config;
use crate::error::Result;
use crate::screen::Action;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place name (words are joined with spaces)
    #[arg(required_unless_present = "list_formats")]
    pub place: Vec<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl SearchArgs {
    /// The search text as typed
    pub fn query(&self) -> String {
        self.place.join(" ")
    }
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let config = Config::load()?;
    let formatter = formatter(&args.format)?;
    let mut screen = build_screen(&config)?;

    screen.dispatch(Action::SearchInputChanged(args.query()));
    screen.dispatch(Action::SubmitSearch);
    screen.settle().await;

    print!("{}", formatter.format(screen.state())?);

    if screen.state().error_message.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
