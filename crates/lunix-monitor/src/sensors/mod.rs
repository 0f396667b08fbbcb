//! Sensor sampling module.
//!
//! Tracks the last known value and liveness of every Lunix sensor and polls
//! all channels once per tick.

mod engine;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::SamplingEngine;
pub use state::{SensorSnapshot, SensorState};
