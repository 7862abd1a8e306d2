//! Lifecycle wrapper around the external core.
//!
//! `load` (async, once) -> `CoreReady::initialize` (sync, once) -> `CoreHandle`.
//! A `CoreHandle` only exists after initialization, so nothing can be sent to
//! an uninitialized core.

use std::collections::VecDeque;
use std::time::Duration;

use crate::kernel::services::ports::{
    CoreError, CoreInstance, CoreLoader, CoreModule, CoreStart, LoadError,
};
use crate::kernel::{Effect, Geometry, Message};

pub type EffectCallback = Box<dyn FnMut(Effect)>;

pub struct CoreHandle {
    location: String,
    instance: Box<dyn CoreInstance>,
    callback: Option<EffectCallback>,
    pending: VecDeque<Effect>,
    sent: u64,
}

/// A loaded core waiting for its initial geometry.
pub struct CoreReady {
    location: String,
    module: Box<dyn CoreModule>,
}

impl CoreHandle {
    pub async fn load(
        loader: &dyn CoreLoader,
        location: &str,
        timeout: Option<Duration>,
    ) -> Result<CoreReady, LoadError> {
        tracing::info!(location, ?timeout, "loading core");
        let module = match timeout {
            Some(after) => tokio::time::timeout(after, loader.load(location))
                .await
                .map_err(|_| LoadError::Timeout {
                    location: location.to_string(),
                    after,
                })??,
            None => loader.load(location).await?,
        };

        Ok(CoreReady {
            location: location.to_string(),
            module,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn messages_sent(&self) -> u64 {
        self.sent
    }

    /// Effects caused by `message` go to the effect callback before this
    /// returns, in the order the core emitted them.
    pub fn send(&mut self, message: Message) -> Result<(), CoreError> {
        tracing::debug!(tag = message.tag(), "send");
        let effects = self.instance.update(&message)?;
        self.sent += 1;
        self.emit(effects);
        Ok(())
    }

    /// Last registration wins. Effects emitted while no callback was
    /// registered are flushed to the new callback immediately.
    pub fn on_effect(&mut self, callback: impl FnMut(Effect) + 'static) {
        if self.callback.is_some() {
            tracing::debug!("replacing effect callback");
        }
        let mut callback: EffectCallback = Box::new(callback);
        while let Some(effect) = self.pending.pop_front() {
            callback(effect);
        }
        self.callback = Some(callback);
    }

    fn emit(&mut self, effects: Vec<Effect>) {
        match self.callback.as_mut() {
            Some(callback) => effects.into_iter().for_each(|effect| callback(effect)),
            None => self.pending.extend(effects),
        }
    }
}

impl CoreReady {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn initialize(self, geometry: Geometry) -> Result<CoreHandle, CoreError> {
        tracing::info!(
            location = %self.location,
            width = geometry.width,
            height = geometry.height,
            "initializing core"
        );
        let CoreStart { instance, effects } = self.module.initialize(geometry)?;
        let mut handle = CoreHandle {
            location: self.location,
            instance,
            callback: None,
            pending: VecDeque::new(),
            sent: 0,
        };
        handle.emit(effects);
        Ok(handle)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/core_handle.rs"]
mod tests;
