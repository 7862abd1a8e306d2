//! Headless protocol core (message/effect/geometry + wire codec).

pub mod effect;
pub mod geometry;
pub mod message;
pub mod services;
pub mod wire;

pub use effect::{Effect, UnknownEffect};
pub use geometry::Geometry;
pub use message::Message;
