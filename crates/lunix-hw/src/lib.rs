//! Lunix:TNG Channel Library
//!
//! Provides non-blocking access to the per-sensor, per-metric device nodes
//! exported by the Lunix:TNG driver (`/dev/lunix<N>-batt` and friends).

pub mod channel;
pub mod error;
pub mod metric;

pub use channel::{
    channel_path, normalize, ChannelOpener, ChannelReader, ChannelSource, DeviceOpener,
    SourceStatus,
};
pub use error::{Error, Result};
pub use metric::MetricKind;

/// Number of sensors the driver exposes.
pub const DEFAULT_SENSOR_COUNT: usize = 16;

/// Path prefix of the sensor device nodes.
pub const DEFAULT_DEVICE_PREFIX: &str = "/dev/lunix";

/// Read buffer capacity in bytes. One byte is reserved, so a single
/// read yields at most `DEFAULT_BUFFER_CAPACITY - 1` bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32;
