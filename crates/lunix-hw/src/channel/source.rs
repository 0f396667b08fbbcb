//! Channel sources and how they are opened.

use crate::{Error, MetricKind, Result};
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use tracing::debug;

/// A readable stream of sensor data.
pub trait ChannelSource: Send {
    /// Performs one read attempt without blocking.
    ///
    /// `Ok(0)` and `ErrorKind::WouldBlock` both mean no data is ready.
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}

impl ChannelSource for File {
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.read(buf)
    }
}

/// Opens channel sources by sensor index and metric kind.
pub trait ChannelOpener {
    fn open(&self, sensor: usize, metric: MetricKind) -> Result<Box<dyn ChannelSource>>;
}

impl<F> ChannelOpener for F
where
    F: Fn(usize, MetricKind) -> Result<Box<dyn ChannelSource>>,
{
    fn open(&self, sensor: usize, metric: MetricKind) -> Result<Box<dyn ChannelSource>> {
        self(sensor, metric)
    }
}

/// Builds the device node path for a channel, e.g. `/dev/lunix3-temp`.
pub fn channel_path(prefix: &str, sensor: usize, metric: MetricKind) -> PathBuf {
    PathBuf::from(format!("{}{}-{}", prefix, sensor, metric.wire_name()))
}

/// Opens Lunix device nodes read-only with `O_NONBLOCK`.
#[derive(Debug, Clone)]
pub struct DeviceOpener {
    prefix: String,
}

impl DeviceOpener {
    /// Creates an opener for device nodes under the given path prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the device node path for a channel.
    pub fn path(&self, sensor: usize, metric: MetricKind) -> PathBuf {
        channel_path(&self.prefix, sensor, metric)
    }
}

impl Default for DeviceOpener {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DEVICE_PREFIX)
    }
}

impl ChannelOpener for DeviceOpener {
    fn open(&self, sensor: usize, metric: MetricKind) -> Result<Box<dyn ChannelSource>> {
        let path = self.path(sensor, metric);

        // Reads must never stall the polling loop
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&path)
            .map_err(|source| Error::ChannelUnavailable {
                path: path.display().to_string(),
                source,
            })?;

        debug!("Opened channel {}", path.display());
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_channel_path() {
        assert_eq!(
            channel_path("/dev/lunix", 0, MetricKind::Battery),
            PathBuf::from("/dev/lunix0-batt")
        );
        assert_eq!(
            channel_path("/dev/lunix", 15, MetricKind::Light),
            PathBuf::from("/dev/lunix15-light")
        );
        assert_eq!(
            DeviceOpener::default().path(3, MetricKind::Temperature),
            PathBuf::from("/dev/lunix3-temp")
        );
    }

    #[test]
    fn test_open_missing_node() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/lunix", dir.path().display());
        let opener = DeviceOpener::new(prefix);

        match opener.open(7, MetricKind::Light) {
            Err(Error::ChannelUnavailable { path, .. }) => assert!(path.ends_with("lunix7-light")),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("missing node should not open"),
        }
    }

    #[test]
    fn test_open_and_read_node() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/lunix", dir.path().display());
        let mut file = File::create(dir.path().join("lunix2-batt")).unwrap();
        file.write_all(b"3.9\n").unwrap();

        let opener = DeviceOpener::new(prefix);
        let mut source = opener.open(2, MetricKind::Battery).unwrap();
        let mut buf = [0u8; 31];
        let n = source.read_nonblocking(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"3.9\n");
        assert_eq!(source.read_nonblocking(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_closure_opener() {
        let opener = |sensor: usize, metric: MetricKind| -> Result<Box<dyn ChannelSource>> {
            Err(Error::InvalidMetric(format!("{}-{}", sensor, metric)))
        };
        assert!(opener.open(1, MetricKind::Battery).is_err());
    }
}
