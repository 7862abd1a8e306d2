//! Rope-backed editing widget.
//!
//! Minimal implementation of [`EditorWidget`]: it keeps the buffer, the
//! display flags the adapter configures and the installed keyboard handler.

use ropey::Rope;
use serde_json::Value;

use super::edit::TextEdit;
use crate::kernel::services::ports::{
    ChangeListener, ContentMode, EditorWidget, ElementRef, WidgetFactory,
};

pub struct TextBuffer {
    rope: Rope,
    mode: ContentMode,
    show_print_margin: bool,
    show_gutter: bool,
    keyboard_handler: Option<Value>,
    listeners: Vec<ChangeListener>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            mode: ContentMode::Text,
            show_print_margin: true,
            show_gutter: true,
            keyboard_handler: None,
            listeners: Vec::new(),
        }
    }

    pub fn factory() -> WidgetFactory {
        Box::new(|element: &ElementRef| {
            tracing::debug!(element = element.id(), "mount text buffer");
            Box::new(TextBuffer::new()) as Box<dyn EditorWidget>
        })
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    pub fn shows_print_margin(&self) -> bool {
        self.show_print_margin
    }

    pub fn shows_gutter(&self) -> bool {
        self.show_gutter
    }

    pub fn keyboard_handler(&self) -> Option<&Value> {
        self.keyboard_handler.as_ref()
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener();
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorWidget for TextBuffer {
    fn set_mode(&mut self, mode: ContentMode) {
        self.mode = mode;
    }

    fn set_show_print_margin(&mut self, show: bool) {
        self.show_print_margin = show;
    }

    fn set_show_gutter(&mut self, show: bool) {
        self.show_gutter = show;
    }

    fn set_keyboard_handler(&mut self, config: &Value) {
        self.keyboard_handler = Some(config.clone());
    }

    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    // One notification per edit batch; no-op edits stay silent.
    fn apply_edit(&mut self, edit: TextEdit) {
        if edit.apply(&mut self.rope) {
            self.notify();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
