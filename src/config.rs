use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::store::{CHAT_PANEL_BOUNDS, SIDEBAR_BOUNDS, UiState};

pub const DEFAULT_APP_NAME: &str = "Gaia Translation App";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shown in the window title, after the current project's name.
    pub app_name: String,
    pub layout: LayoutConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}

/// Panel layout the window opens with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sidebar_open: bool,
    pub chat_panel_open: bool,
    pub lower_pane_open: bool,
    pub sidebar_width: f64,
    pub chat_panel_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let ui = UiState::default();
        Self {
            sidebar_open: ui.sidebar_open,
            chat_panel_open: ui.chat_panel_open,
            lower_pane_open: ui.lower_pane_open,
            sidebar_width: ui.sidebar_width,
            chat_panel_width: ui.chat_panel_width,
        }
    }
}

impl LayoutConfig {
    /// Initial UI state, with widths clamped into their panel bounds.
    pub fn ui_state(&self) -> UiState {
        UiState {
            sidebar_open: self.sidebar_open,
            chat_panel_open: self.chat_panel_open,
            lower_pane_open: self.lower_pane_open,
            settings_open: false,
            sidebar_width: SIDEBAR_BOUNDS.clamp(self.sidebar_width),
            chat_panel_width: CHAT_PANEL_BOUNDS.clamp(self.chat_panel_width),
        }
    }
}
