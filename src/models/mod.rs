//! Data models (edits + the buffer widget).

pub mod edit;
pub mod text_buffer;

pub use edit::TextEdit;
pub use text_buffer::TextBuffer;
