//! Sensor channel module.
//!
//! A channel is one (sensor index, metric kind) device node. Channels are
//! opened once in non-blocking mode and polled with single bounded reads.

mod reader;
mod source;

pub use reader::{normalize, ChannelReader, SourceStatus};
pub use source::{channel_path, ChannelOpener, ChannelSource, DeviceOpener};
