//! Dispatch bridge: editor changes -> `HtmlChanged` messages, core effects ->
//! adapter calls.
//!
//! Callbacks on either side only enqueue into the inbox; `pump` is the single
//! place where the core and the editor are touched.

use std::sync::mpsc::{self, Receiver};

use crate::kernel::services::adapters::{CoreHandle, EditorAdapter};
use crate::kernel::services::ports::{BindError, CoreError, DispatchMode, LoadError};
use crate::kernel::{Effect, Message};
use crate::models::TextEdit;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("bridge was already launched")]
    AlreadyLaunched,
}

#[derive(Debug)]
enum Inbound {
    Changed,
    Effect(Effect),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub messages_sent: u64,
    pub send_failures: u64,
    pub effects_applied: u64,
    pub effects_ignored: u64,
}

pub struct Bridge {
    core: CoreHandle,
    editor: EditorAdapter,
    mode: DispatchMode,
    inbox: Receiver<Inbound>,
    stats: BridgeStats,
}

impl Bridge {
    /// Registers the effect callback on `core` and, in push mode, the change
    /// callback on `editor`. Effects the core emitted during initialization
    /// are applied before this returns.
    pub fn wire(mut core: CoreHandle, mut editor: EditorAdapter, mode: DispatchMode) -> Self {
        let (tx, inbox) = mpsc::channel();

        let effects = tx.clone();
        core.on_effect(move |effect| {
            let _ = effects.send(Inbound::Effect(effect));
        });
        if mode == DispatchMode::Push {
            editor.on_change(move || {
                let _ = tx.send(Inbound::Changed);
            });
        }

        let mut bridge = Self {
            core,
            editor,
            mode,
            inbox,
            stats: BridgeStats::default(),
        };
        bridge.pump();
        tracing::info!(?mode, location = bridge.core.location(), "bridge active");
        bridge
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    pub fn core(&self) -> &CoreHandle {
        &self.core
    }

    pub fn editor(&self) -> &EditorAdapter {
        &self.editor
    }

    /// Applies one host edit, then dispatches whatever it caused.
    pub fn edit(&mut self, edit: TextEdit) -> usize {
        self.editor.widget_mut().apply_edit(edit);
        self.pump()
    }

    /// Sends the current editor content once, regardless of mode.
    pub fn sync_content(&mut self) -> Result<(), CoreError> {
        let content = self.editor.current_content();
        if let Err(e) = self.core.send(Message::HtmlChanged(content)) {
            self.stats.send_failures += 1;
            return Err(e);
        }
        self.stats.messages_sent += 1;
        self.pump();
        Ok(())
    }

    /// Drains the inbox until it is empty. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            handled += 1;
            match event {
                Inbound::Changed => self.forward_change(),
                Inbound::Effect(effect) => self.apply(effect),
            }
        }
        handled
    }

    fn forward_change(&mut self) {
        let content = self.editor.current_content();
        tracing::debug!(len = content.len(), "editor changed");
        match self.core.send(Message::HtmlChanged(content)) {
            Ok(()) => self.stats.messages_sent += 1,
            Err(e) => {
                self.stats.send_failures += 1;
                tracing::error!(error = %e, "core rejected change");
            }
        }
    }

    fn apply(&mut self, effect: Effect) {
        match self.editor.apply_effect(&effect) {
            Ok(()) => self.stats.effects_applied += 1,
            Err(e) => {
                self.stats.effects_ignored += 1;
                tracing::warn!(error = %e, "ignoring effect");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/bridge.rs"]
mod tests;
