//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types shared by the bridge and its collaborators.
//! - `adapters`: OS/runtime specific implementations (IO/async).

pub mod adapters;
pub mod ports;
