//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::screen::{ScreenState, View};
use serde::{Deserialize, Serialize};

/// Screen state together with its render mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: ScreenState,
    pub view: View,
}

impl From<&ScreenState> for Snapshot {
    fn from(state: &ScreenState) -> Self {
        Self {
            state: state.clone(),
            view: state.view(),
        }
    }
}

/// JSON formatter - outputs the snapshot as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Screen state and render mode as JSON"
    }

    fn format(&self, state: &ScreenState) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Snapshot::from(state))?)
    }
}
