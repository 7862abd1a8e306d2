use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kernel::Geometry;

pub const DEFAULT_ELEMENT_ID: &str = "html-input";
pub const DEFAULT_WIDGET: &str = "html-editor";
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Whether the bridge forwards editor changes to the core on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Wire the editor's change stream to `HtmlChanged` messages.
    #[default]
    Push,
    /// Mount the widget before the core loads and leave content delivery to the host.
    Passive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub core_location: String,
    /// Program (plus leading args) that runs `core_location`; empty executes it directly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runner: Vec<String>,
    #[serde(default = "default_element_id")]
    pub element_id: String,
    #[serde(default = "default_widget")]
    pub widget: String,
    #[serde(default)]
    pub mode: DispatchMode,
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Geometry>,
}

impl BridgeConfig {
    pub fn new(core_location: impl Into<String>) -> Self {
        Self {
            core_location: core_location.into(),
            runner: Vec::new(),
            element_id: default_element_id(),
            widget: default_widget(),
            mode: DispatchMode::default(),
            load_timeout_ms: default_load_timeout_ms(),
            viewport: None,
        }
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

fn default_element_id() -> String {
    DEFAULT_ELEMENT_ID.to_string()
}

fn default_widget() -> String {
    DEFAULT_WIDGET.to_string()
}

fn default_load_timeout_ms() -> Option<u64> {
    Some(DEFAULT_LOAD_TIMEOUT_MS)
}
