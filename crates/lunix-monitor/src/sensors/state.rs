//! Per-sensor state: three channels and their last known values.

use lunix_hw::{ChannelOpener, ChannelReader, MetricKind, SourceStatus};

/// Point-in-time view of one sensor, handed to the presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Sensor index
    pub index: usize,
    /// Last battery reading, empty if none yet
    pub battery: String,
    /// Last temperature reading, empty if none yet
    pub temperature: String,
    /// Last light reading, empty if none yet
    pub light: String,
    /// Battery channel is open and has reported a value
    pub online: bool,
}

impl SensorSnapshot {
    /// Returns the value for a metric kind.
    pub fn value(&self, metric: MetricKind) -> &str {
        match metric {
            MetricKind::Battery => &self.battery,
            MetricKind::Temperature => &self.temperature,
            MetricKind::Light => &self.light,
        }
    }
}

/// State of one sensor.
#[derive(Debug)]
pub struct SensorState {
    index: usize,
    readers: [ChannelReader; 3],
    values: [String; 3],
}

impl SensorState {
    /// Opens all three channels of a sensor. Each channel that fails to open
    /// is recorded as unavailable without affecting the others.
    pub fn new(opener: &dyn ChannelOpener, index: usize, capacity: usize) -> Self {
        let readers =
            MetricKind::ALL.map(|kind| ChannelReader::open(opener, index, kind, capacity));

        Self {
            index,
            readers,
            values: Default::default(),
        }
    }

    /// Returns the last known value for a metric, empty if none yet.
    pub fn value(&self, metric: MetricKind) -> &str {
        &self.values[metric.index()]
    }

    /// Returns the open status of a metric channel.
    pub fn status(&self, metric: MetricKind) -> SourceStatus {
        self.readers[metric.index()].status()
    }

    /// A sensor is online when its battery channel is open and has a value.
    /// Temperature and light do not affect liveness.
    pub fn is_online(&self) -> bool {
        self.status(MetricKind::Battery) == SourceStatus::Open
            && !self.value(MetricKind::Battery).is_empty()
    }

    /// Polls battery, temperature and light once, in that order.
    pub fn poll_once(&mut self) {
        for (reader, value) in self.readers.iter_mut().zip(self.values.iter_mut()) {
            if let Some(fresh) = reader.poll() {
                *value = fresh;
            }
        }
    }

    /// Returns a snapshot of the current values and liveness.
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            index: self.index,
            battery: self.value(MetricKind::Battery).to_string(),
            temperature: self.value(MetricKind::Temperature).to_string(),
            light: self.value(MetricKind::Light).to_string(),
            online: self.is_online(),
        }
    }

    /// Closes all open channels. Values and statuses are kept.
    pub fn release(&mut self) {
        for reader in &mut self.readers {
            reader.release();
        }
    }

    #[cfg(test)]
    fn set_value(&mut self, metric: MetricKind, value: &str) {
        self.values[metric.index()] = value.to_string();
    }
}
