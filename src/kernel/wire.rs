//! Wire shapes for messages/effects and the line protocol spoken with an
//! out-of-process core.
//!
//! Every frame is one JSON value followed by `\n`. The host writes
//! [`CoreRequest`]s and reads exactly one [`CoreReply`] per request; the core
//! opens the conversation with a single `ready` reply.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::effect::{Effect, SET_KEYBOARD_HANDLER};
use super::geometry::Geometry;
use super::message::{Message, HTML_CHANGED};

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_LINE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("unknown message tag `{0}`")]
    UnknownMessage(String),
    #[error("message `{tag}` expects payload {expected}")]
    BadPayload { tag: String, expected: &'static str },
    #[error("effect `{kind}` is missing field `{field}`")]
    MissingField { kind: String, field: &'static str },
}

/// `{"tag": "HtmlChanged", "payload": ["<p>hi</p>"]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageWire {
    pub tag: String,
    #[serde(default)]
    pub payload: Vec<Value>,
}

impl From<Message> for MessageWire {
    fn from(message: Message) -> Self {
        let tag = message.tag().to_string();
        let payload = match message {
            Message::HtmlChanged(html) => vec![Value::String(html)],
        };
        Self { tag, payload }
    }
}

impl TryFrom<MessageWire> for Message {
    type Error = WireError;

    fn try_from(wire: MessageWire) -> Result<Self, Self::Error> {
        let MessageWire { tag, payload } = wire;
        match tag.as_str() {
            HTML_CHANGED => match <[Value; 1]>::try_from(payload) {
                Ok([Value::String(html)]) => Ok(Message::HtmlChanged(html)),
                _ => Err(WireError::BadPayload {
                    tag,
                    expected: "[string]",
                }),
            },
            _ => Err(WireError::UnknownMessage(tag)),
        }
    }
}

/// `{"type": "setKeyboardHandler", "config": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectWire {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<Effect> for EffectWire {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::SetKeyboardHandler { config } => {
                let mut fields = Map::new();
                fields.insert("config".to_string(), config);
                Self {
                    kind: SET_KEYBOARD_HANDLER.to_string(),
                    fields,
                }
            }
            Effect::Unknown { kind, fields } => Self { kind, fields },
        }
    }
}

impl TryFrom<EffectWire> for Effect {
    type Error = WireError;

    fn try_from(wire: EffectWire) -> Result<Self, Self::Error> {
        let EffectWire { kind, mut fields } = wire;
        match kind.as_str() {
            SET_KEYBOARD_HANDLER => {
                let config = fields.remove("config").ok_or(WireError::MissingField {
                    kind: kind.clone(),
                    field: "config",
                })?;
                Ok(Effect::SetKeyboardHandler { config })
            }
            _ => Ok(Effect::Unknown { kind, fields }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum CoreRequest {
    Initialize { geometry: Geometry },
    Send { message: Message },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum CoreReply {
    Ready { protocol: u32 },
    Effects { effects: Vec<Effect> },
    Error { message: String },
}

pub fn encode_line<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode_line<T: DeserializeOwned>(line: &str) -> serde_json::Result<T> {
    serde_json::from_str(line.trim_end_matches(['\r', '\n']))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/wire.rs"]
mod tests;
