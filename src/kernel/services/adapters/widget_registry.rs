use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{BindError, EditorWidget, ElementRef, WidgetFactory};

/// Widget implementations by kind. Hosts register concrete widgets here before
/// the first adapter is created.
#[derive(Default)]
pub struct WidgetRegistry {
    factories: FxHashMap<CompactString, WidgetFactory>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a kind twice keeps the newer factory.
    pub fn register(&mut self, kind: &str, factory: WidgetFactory) {
        if self.factories.insert(kind.into(), factory).is_some() {
            tracing::debug!(kind, "widget factory replaced");
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn build(
        &self,
        kind: &str,
        element: &ElementRef,
    ) -> Result<Box<dyn EditorWidget>, BindError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| BindError::UnregisteredWidget(kind.to_string()))?;
        Ok(factory(element))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/widget_registry.rs"]
mod tests;
