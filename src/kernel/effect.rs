use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::wire::EffectWire;

pub const SET_KEYBOARD_HANDLER: &str = "setKeyboardHandler";

/// Core-originated instruction for the host environment.
///
/// Payloads are opaque: the bridge forwards them to the editor adapter as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EffectWire", try_from = "EffectWire")]
pub enum Effect {
    SetKeyboardHandler {
        config: Value,
    },
    /// A tag this build does not understand. Kept so newer cores cannot crash
    /// an older bridge.
    Unknown {
        kind: String,
        fields: Map<String, Value>,
    },
}

impl Effect {
    pub fn set_keyboard_handler(config: impl Into<Value>) -> Self {
        Effect::SetKeyboardHandler {
            config: config.into(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Effect::SetKeyboardHandler { .. } => SET_KEYBOARD_HANDLER,
            Effect::Unknown { kind, .. } => kind,
        }
    }
}

/// Returned by the editor adapter for effects it has no setter for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect `{kind}`")]
pub struct UnknownEffect {
    pub kind: String,
}
