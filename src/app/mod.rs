//! Application layer: startup sequencing and the live dispatch bridge.

pub mod bridge;
pub mod launcher;

pub use bridge::{Bridge, BridgeError, BridgeStats};
pub use launcher::{BridgePhase, Launcher};
