//! Sampling engine: one poll pass over every sensor per tick.

use lunix_hw::{ChannelOpener, MetricKind, SourceStatus};
use tracing::info;

use super::state::{SensorSnapshot, SensorState};

/// Owns the state of all sensors.
#[derive(Debug)]
pub struct SamplingEngine {
    sensors: Vec<SensorState>,
    passes: u64,
}

impl SamplingEngine {
    /// Opens every channel of sensors `0..count`, once each.
    pub fn new(opener: &dyn ChannelOpener, count: usize, capacity: usize) -> Self {
        let sensors: Vec<SensorState> = (0..count)
            .map(|index| SensorState::new(opener, index, capacity))
            .collect();

        let open = sensors
            .iter()
            .flat_map(|s| MetricKind::ALL.map(|kind| s.status(kind)))
            .filter(|status| *status == SourceStatus::Open)
            .count();
        info!(
            "Opened {} of {} channels across {} sensors",
            open,
            count * MetricKind::ALL.len(),
            count
        );

        Self { sensors, passes: 0 }
    }

    /// Polls every sensor once, in ascending index order.
    pub fn poll_all(&mut self) {
        for sensor in &mut self.sensors {
            sensor.poll_once();
        }
        self.passes += 1;
    }

    /// Returns index-ordered snapshots as of the last poll pass.
    pub fn snapshot_all(&self) -> Vec<SensorSnapshot> {
        self.sensors.iter().map(SensorState::snapshot).collect()
    }

    /// Number of completed poll passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Number of sensors currently online.
    pub fn online_count(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_online()).count()
    }

    /// Closes all open channels.
    pub fn release_all(&mut self) {
        for sensor in &mut self.sensors {
            sensor.release();
        }
    }
}
