use crate::kernel::services::adapters::{
    CoreHandle, EditorAdapter, EnvironmentProbe, WidgetRegistry,
};
use crate::kernel::services::ports::{BridgeConfig, CoreLoader, DispatchMode, Host};

use super::bridge::{Bridge, BridgeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgePhase {
    #[default]
    Uninitialized,
    Loading,
    Active,
    Failed,
}

/// Runs the startup sequence once: probe, load, initialize, bind, wire.
pub struct Launcher {
    config: BridgeConfig,
    phase: BridgePhase,
}

impl Launcher {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            phase: BridgePhase::Uninitialized,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn phase(&self) -> BridgePhase {
        self.phase
    }

    pub async fn launch(
        &mut self,
        host: &dyn Host,
        loader: &dyn CoreLoader,
        registry: &WidgetRegistry,
    ) -> Result<Bridge, BridgeError> {
        if self.phase != BridgePhase::Uninitialized {
            return Err(BridgeError::AlreadyLaunched);
        }

        self.set_phase(BridgePhase::Loading);
        let started = self.start(host, loader, registry).await;
        match started {
            Ok(bridge) => {
                self.set_phase(BridgePhase::Active);
                Ok(bridge)
            }
            Err(e) => {
                tracing::error!(error = %e, "bridge startup failed");
                self.set_phase(BridgePhase::Failed);
                Err(e)
            }
        }
    }

    async fn start(
        &self,
        host: &dyn Host,
        loader: &dyn CoreLoader,
        registry: &WidgetRegistry,
    ) -> Result<Bridge, BridgeError> {
        let config = &self.config;
        let geometry = match config.viewport {
            Some(viewport) => viewport,
            None => EnvironmentProbe::new(host).measure(),
        };

        let bind = || EditorAdapter::create(host, registry, &config.widget, &config.element_id);
        let mounted = match config.mode {
            DispatchMode::Passive => Some(bind()?),
            DispatchMode::Push => None,
        };

        let ready = CoreHandle::load(loader, &config.core_location, config.load_timeout()).await?;
        let core = ready.initialize(geometry)?;
        let editor = match mounted {
            Some(editor) => editor,
            None => bind()?,
        };

        Ok(Bridge::wire(core, editor, config.mode))
    }

    fn set_phase(&mut self, phase: BridgePhase) {
        tracing::info!(from = ?self.phase, to = ?phase, "bridge phase");
        self.phase = phase;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/launcher.rs"]
mod tests;
