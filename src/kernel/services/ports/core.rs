//! Contract with the external application core.
//!
//! The core is opaque: it is loaded once (async), initialized once with the
//! probed geometry, then fed messages one at a time. Each message yields zero
//! or more effects in emission order.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::Duration;

use crate::kernel::{Effect, Geometry, Message};

pub type LoadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Box<dyn CoreModule>, LoadError>> + 'a>>;

pub trait CoreLoader {
    /// Fetch and instantiate the core found at `location`.
    fn load<'a>(&'a self, location: &'a str) -> LoadFuture<'a>;
}

/// A loaded, not yet initialized core.
pub trait CoreModule {
    fn initialize(self: Box<Self>, geometry: Geometry) -> Result<CoreStart, CoreError>;
}

pub trait CoreInstance {
    fn update(&mut self, message: &Message) -> Result<Vec<Effect>, CoreError>;
}

pub struct CoreStart {
    pub instance: Box<dyn CoreInstance>,
    /// Effects produced by initialization itself.
    pub effects: Vec<Effect>,
}

impl CoreStart {
    pub fn new(instance: Box<dyn CoreInstance>) -> Self {
        Self {
            instance,
            effects: Vec::new(),
        }
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("core resource `{location}` is unreachable: {source}")]
    Unreachable {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("core resource `{location}` is invalid: {reason}")]
    Invalid { location: String, reason: String },
    #[error("failed to start core `{location}`: {source}")]
    Spawn {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("core handshake failed: {0}")]
    Handshake(String),
    #[error("core speaks protocol {found}, expected {expected}")]
    ProtocolMismatch { expected: u32, found: u32 },
    #[error("core `{location}` did not load within {after:?}")]
    Timeout { location: String, after: Duration },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("core i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("core frame is malformed: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("core closed its channel")]
    Closed,
    #[error("core rejected request: {0}")]
    Rejected(String),
    #[error("core frame exceeds {limit} bytes")]
    Oversized { limit: usize },
}
