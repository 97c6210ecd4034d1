//! Screen command handler
//!
//! Interactive terminal shell around the location screen. Every line read
//! from stdin is either a place name to search for or a `:` command.

use crate::cli::{build_screen, init_logging};
use crate::config::Config;
use crate::error::Result;
use crate::format::text::TextFormatter;
use crate::format::OutputFormatter;
use crate::screen::{ScreenState, UiEvent};
use clap::Args;
use std::io::IsTerminal;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Spinner redraw interval
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

const CLEAR: &str = "\x1b[2J\x1b[H";

/// Screen command arguments
#[derive(Args)]
pub struct ScreenArgs {
    /// Never use colors or clear the terminal
    #[arg(long)]
    pub no_color: bool,
}

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Type this text and submit it
    Search(String),
    /// Submit whatever is in the field
    Submit,
    /// Empty the field
    Clear,
    Refresh,
    Help,
    Quit,
}

impl Input {
    /// Interpret one line of stdin
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.trim() {
            "" => Input::Submit,
            ":r" | ":refresh" => Input::Refresh,
            ":c" | ":clear" => Input::Clear,
            ":h" | ":help" | "?" => Input::Help,
            ":q" | ":quit" => Input::Quit,
            _ => Input::Search(line.to_string()),
        }
    }
}

/// Terminal drawing state
struct Painter {
    fancy: bool,
    frame: usize,
    /// Whether the search field has focus
    editing: bool,
}

impl Painter {
    fn draw(&self, state: &ScreenState) -> Result<()> {
        let formatter = if self.fancy {
            TextFormatter::colored()
        } else {
            TextFormatter::plain()
        };
        let body = formatter.with_frame(self.frame).format(state)?;

        if self.fancy {
            print!("{}", CLEAR);
        } else {
            println!("----");
        }
        print!("{}", body);
        if self.editing {
            println!("\nsearch> (type a place and press Enter, :h for help)");
        } else {
            println!("\n(Enter to search again, :r to refresh, :q to quit)");
        }
        Ok(())
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <place>     search for a place by name");
    println!("  <Enter>     submit the current search text");
    println!("  :r          refresh current location");
    println!("  :c          clear the search text");
    println!("  :q          quit");
}

/// Run the screen command
pub async fn run(args: ScreenArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let mut screen = build_screen(&config)?;
    let mut ui = screen.ui_events();
    let handle = screen.handle();
    let mut updates = handle.subscribe();
    let task = tokio::spawn(screen.run());

    let mut painter = Painter {
        fancy: !args.no_color && std::io::stdout().is_terminal(),
        frame: 0,
        editing: true,
    };
    let mut state = handle.state();
    painter.draw(&state)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                painter.editing = true;
                match Input::parse(&line) {
                    Input::Search(text) => handle.search(text)?,
                    Input::Submit => handle.submit()?,
                    Input::Clear => handle.set_input("")?,
                    Input::Refresh => handle.refresh()?,
                    Input::Help => print_help(),
                    Input::Quit => break,
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                state = updates.borrow_and_update().clone();
                painter.draw(&state)?;
            }

            Some(event) = ui.recv() => match event {
                UiEvent::DismissKeyboard => {
                    debug!("Search field released");
                    painter.editing = false;
                    painter.draw(&state)?;
                }
            },

            _ = spinner.tick(), if state.is_loading => {
                painter.frame += 1;
                painter.draw(&state)?;
            }
        }
    }

    // The screen may already be gone if the update channel closed
    let _ = handle.unmount();
    let _ = task.await;
    Ok(())
}
