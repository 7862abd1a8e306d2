//! htom-bridge: message/effect dispatch between an editing widget and an
//! external application core.
//!
//! - kernel: protocol types, wire codec, service ports and adapters
//! - models: the rope-backed buffer widget and host edits
//! - app: startup sequencing and the live bridge

pub mod app;
pub mod kernel;
pub mod models;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
