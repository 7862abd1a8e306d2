use serde::{Deserialize, Serialize};

use super::wire::MessageWire;

pub const HTML_CHANGED: &str = "HtmlChanged";

/// User-originated event sent into the core.
///
/// On the wire a message is `{"tag": <variant>, "payload": [<fields>...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MessageWire", try_from = "MessageWire")]
pub enum Message {
    /// Full editor content after a change, never a diff.
    HtmlChanged(String),
}

impl Message {
    pub fn tag(&self) -> &'static str {
        match self {
            Message::HtmlChanged(_) => HTML_CHANGED,
        }
    }
}
