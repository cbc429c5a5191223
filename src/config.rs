//! Editor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Breakpoint, StyleMode, KNOWN_TEMPLATES};
use crate::Result;

/// Tunables for an [`crate::Editor`]. Every field has a default, so a
/// partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet window for debounced edits (color picker and friends).
    pub debounce_ms: u64,
    /// Mode for plain `set_style` calls. Controls carry their own mode.
    pub default_mode: StyleMode,
    pub initial_breakpoint: Breakpoint,
    /// Templates tried when reading a raw value outside any control.
    pub templates: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            default_mode: StyleMode::Responsive,
            initial_breakpoint: Breakpoint::Desktop,
            templates: KNOWN_TEMPLATES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
