use compact_str::CompactString;
use serde_json::Value;

use crate::kernel::Geometry;
use crate::models::TextEdit;

/// The environment the bridge runs in: a viewport plus named elements that
/// widgets can be mounted on.
pub trait Host {
    fn viewport(&self) -> Geometry;
    fn element(&self, id: &str) -> Option<ElementRef>;
}

/// Handle to a host element; only hosts create these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    id: CompactString,
}

impl ElementRef {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    Text,
    Html,
}

pub type ChangeListener = Box<dyn FnMut()>;

/// A concrete text editing widget.
///
/// Implementations notify change listeners once per logical edit batch, after
/// the buffer has been updated.
pub trait EditorWidget {
    fn set_mode(&mut self, mode: ContentMode);
    fn set_show_print_margin(&mut self, show: bool);
    fn set_show_gutter(&mut self, show: bool);
    /// Installs an opaque keyboard handler descriptor, replacing the previous one.
    fn set_keyboard_handler(&mut self, config: &Value);
    fn value(&self) -> String;
    fn on_change(&mut self, listener: ChangeListener);
    fn apply_edit(&mut self, edit: TextEdit);
}

pub type WidgetFactory = Box<dyn Fn(&ElementRef) -> Box<dyn EditorWidget>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("host has no element `{0}`")]
    MissingElement(String),
    #[error("no widget registered as `{0}`")]
    UnregisteredWidget(String),
}
