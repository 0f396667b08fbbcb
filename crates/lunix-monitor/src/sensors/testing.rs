//! Scripted channels for tests.

use lunix_hw::{ChannelSource, Error, MetricKind, Result};
use std::collections::{HashMap, VecDeque};
use std::io::{self, ErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Channel that returns one scripted payload per read, then would-block.
pub struct ScriptedSource {
    reads: VecDeque<Vec<u8>>,
    open_handles: Arc<AtomicUsize>,
}

impl ChannelSource for ScriptedSource {
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reads.pop_front() {
            Some(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            None => Err(io::Error::from(ErrorKind::WouldBlock)),
        }
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Opener backed by a table of scripted channels.
///
/// Channels missing from the table are unavailable. Counts how many
/// handles are currently open so tests can check release.
#[derive(Default)]
pub struct ScriptedOpener {
    channels: Mutex<HashMap<(usize, MetricKind), VecDeque<Vec<u8>>>>,
    open_handles: Arc<AtomicUsize>,
}

impl ScriptedOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an open channel with the given reads, one per poll.
    pub fn channel(self, sensor: usize, metric: MetricKind, reads: &[&str]) -> Self {
        let reads = reads.iter().map(|r| r.as_bytes().to_vec()).collect();
        self.channels
            .lock()
            .unwrap()
            .insert((sensor, metric), reads);
        self
    }

    /// Registers all three channels of a sensor.
    pub fn sensor(self, sensor: usize, batt: &[&str], temp: &[&str], light: &[&str]) -> Self {
        self.channel(sensor, MetricKind::Battery, batt)
            .channel(sensor, MetricKind::Temperature, temp)
            .channel(sensor, MetricKind::Light, light)
    }

    /// Number of handles opened and not yet released.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }
}

impl lunix_hw::ChannelOpener for ScriptedOpener {
    fn open(&self, sensor: usize, metric: MetricKind) -> Result<Box<dyn ChannelSource>> {
        let reads = self
            .channels
            .lock()
            .unwrap()
            .remove(&(sensor, metric))
            .ok_or_else(|| Error::Io(io::Error::from(ErrorKind::NotFound)))?;
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSource {
            reads,
            open_handles: self.open_handles.clone(),
        }))
    }
}
