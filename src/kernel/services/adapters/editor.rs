//! Editor adapter: owns the mounted widget and turns effects into widget calls.

use crate::kernel::services::ports::{BindError, ContentMode, EditorWidget, ElementRef, Host};
use crate::kernel::{Effect, UnknownEffect};

use super::widget_registry::WidgetRegistry;

pub struct EditorAdapter {
    element: ElementRef,
    widget: Box<dyn EditorWidget>,
}

impl EditorAdapter {
    /// Mounts a `widget_kind` widget on the host element `element_id` and
    /// applies the fixed display configuration (HTML mode, no print margin, no
    /// gutter).
    pub fn create(
        host: &dyn Host,
        registry: &WidgetRegistry,
        widget_kind: &str,
        element_id: &str,
    ) -> Result<Self, BindError> {
        let element = host
            .element(element_id)
            .ok_or_else(|| BindError::MissingElement(element_id.to_string()))?;
        let mut widget = registry.build(widget_kind, &element)?;

        widget.set_mode(ContentMode::Html);
        widget.set_show_print_margin(false);
        widget.set_show_gutter(false);

        tracing::info!(element = element.id(), widget = widget_kind, "editor bound");
        Ok(Self { element, widget })
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    pub fn on_change(&mut self, callback: impl FnMut() + 'static) {
        self.widget.on_change(Box::new(callback));
    }

    pub fn current_content(&self) -> String {
        self.widget.value()
    }

    /// Unknown effects leave the widget untouched.
    pub fn apply_effect(&mut self, effect: &Effect) -> Result<(), UnknownEffect> {
        match effect {
            Effect::SetKeyboardHandler { config } => {
                tracing::debug!(%config, "set keyboard handler");
                self.widget.set_keyboard_handler(config);
                Ok(())
            }
            Effect::Unknown { kind, .. } => Err(UnknownEffect { kind: kind.clone() }),
        }
    }

    pub fn widget(&self) -> &dyn EditorWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn EditorWidget {
        self.widget.as_mut()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/editor.rs"]
mod tests;
