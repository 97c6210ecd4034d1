//! Text rendering of the location screen

use crate::constants::messages;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::screen::{ScreenState, View};

/// Spinner animation frames
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Text formatter - draws the whole screen
pub struct TextFormatter {
    /// Paint errors red with ANSI escapes
    color: bool,
    /// Spinner frame shown while loading
    frame: usize,
}

impl TextFormatter {
    /// No escape codes, for pipes and files
    pub fn plain() -> Self {
        Self {
            color: false,
            frame: 0,
        }
    }

    /// Errors in red, for an interactive terminal
    pub fn colored() -> Self {
        Self {
            color: true,
            frame: 0,
        }
    }

    /// Use spinner frame `frame` (wraps around)
    pub fn with_frame(mut self, frame: usize) -> Self {
        self.frame = frame % SPINNER_FRAMES.len();
        self
    }

    fn results(&self, view: &View) -> Vec<String> {
        let lines = view.lines();
        match view {
            View::Loading => lines
                .into_iter()
                .map(|line| format!("{} {}", SPINNER_FRAMES[self.frame], line))
                .collect(),
            View::Error { .. } if self.color => lines
                .into_iter()
                .map(|line| format!("{}{}{}", RED, line, RESET))
                .collect(),
            _ => lines,
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "The screen as plain text"
    }

    fn format(&self, state: &ScreenState) -> Result<String> {
        let input = if state.search_input.is_empty() {
            format!("<{}>", messages::INPUT_PLACEHOLDER)
        } else {
            state.search_input.clone()
        };

        let mut output = String::new();
        output.push_str(&format!("{}\n\n", messages::TITLE));
        output.push_str(&format!("> {}\n", input));
        output.push_str(&format!("[ {} ]\n", messages::CHANGE_LOCATION));
        output.push_str(&format!("[ {} ]\n\n", messages::REFRESH_LOCATION));

        for line in self.results(&state.view()) {
            output.push_str(&line);
            output.push('\n');
        }

        Ok(output)
    }
}
