//! Channel reader: one non-blocking poll attempt per cycle.

use super::source::{ChannelOpener, ChannelSource};
use crate::MetricKind;
use std::io::ErrorKind;
use tracing::{debug, trace};

/// Outcome of the one-time open attempt for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// The channel could not be opened. Never retried.
    Unavailable,
    /// The channel was opened.
    Open,
}

/// Normalizes a raw payload into a single line of text.
///
/// The payload is clipped to `max_len` bytes and cut at the first line
/// terminator or NUL byte. Invalid UTF-8 is replaced, and the result never exceeds
/// `max_len` bytes.
pub fn normalize(raw: &[u8], max_len: usize) -> String {
    let raw = &raw[..raw.len().min(max_len)];
    let text = String::from_utf8_lossy(raw);
    let line = text
        .split(|c: char| matches!(c, '\n' | '\r' | '\0'))
        .next()
        .unwrap_or_default();

    // Replacement characters can grow the text past the limit
    let mut end = line.len().min(max_len);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].to_string()
}

/// Reader for a single sensor channel.
pub struct ChannelReader {
    sensor: usize,
    metric: MetricKind,
    status: SourceStatus,
    source: Option<Box<dyn ChannelSource>>,
    buf: Vec<u8>,
}

impl ChannelReader {
    /// Attempts to open the channel once.
    ///
    /// Failure is not an error: the reader is recorded as unavailable and
    /// every later poll is a no-op. `capacity` is the buffer size; a single
    /// read yields at most `capacity - 1` bytes.
    pub fn open(
        opener: &dyn ChannelOpener,
        sensor: usize,
        metric: MetricKind,
        capacity: usize,
    ) -> Self {
        match opener.open(sensor, metric) {
            Ok(source) => Self::with_source(sensor, metric, source, capacity),
            Err(e) => {
                debug!("Sensor {} {} unavailable: {}", sensor, metric, e);
                Self::unavailable(sensor, metric, capacity)
            }
        }
    }

    /// Creates a reader over an already opened source.
    pub fn with_source(
        sensor: usize,
        metric: MetricKind,
        source: Box<dyn ChannelSource>,
        capacity: usize,
    ) -> Self {
        Self {
            sensor,
            metric,
            status: SourceStatus::Open,
            source: Some(source),
            buf: vec![0; capacity.saturating_sub(1).max(1)],
        }
    }

    /// Creates a reader whose channel is permanently unavailable.
    pub fn unavailable(sensor: usize, metric: MetricKind, capacity: usize) -> Self {
        Self {
            sensor,
            metric,
            status: SourceStatus::Unavailable,
            source: None,
            buf: vec![0; capacity.saturating_sub(1).max(1)],
        }
    }

    /// Returns the open status decided at construction.
    pub fn status(&self) -> SourceStatus {
        self.status
    }

    /// Returns the longest value this reader can produce, in bytes.
    pub fn max_len(&self) -> usize {
        self.buf.len()
    }

    /// Performs one bounded, non-blocking read.
    ///
    /// Returns the normalized value when any bytes were read, even if it is
    /// identical to the previous value. Returns `None` when nothing was
    /// read, the channel is unavailable, or it has been released.
    pub fn poll(&mut self) -> Option<String> {
        let source = self.source.as_mut()?;

        match source.read_nonblocking(&mut self.buf) {
            Ok(0) => None,
            Ok(n) => {
                let n = n.min(self.buf.len());
                Some(normalize(&self.buf[..n], self.buf.len()))
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {
                None
            }
            Err(e) => {
                trace!("Sensor {} {} read failed: {}", self.sensor, self.metric, e);
                None
            }
        }
    }

    /// Closes the channel. The recorded status is kept.
    pub fn release(&mut self) {
        if self.source.take().is_some() {
            debug!("Released sensor {} {}", self.sensor, self.metric);
        }
    }
}

impl std::fmt::Debug for ChannelReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelReader")
            .field("sensor", &self.sensor)
            .field("metric", &self.metric)
            .field("status", &self.status)
            .field("held", &self.source.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use std::collections::VecDeque;
    use std::io;

    /// Yields one scripted read per call, then would-block.
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl ChannelSource for Scripted {
        fn read_nonblocking(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(Ok(bytes)) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    Ok(n)
                }
                Some(Err(e)) => Err(e),
                None => Err(io::Error::from(ErrorKind::WouldBlock)),
            }
        }
    }

    fn scripted(reads: Vec<io::Result<Vec<u8>>>) -> ChannelReader {
        ChannelReader::with_source(
            0,
            MetricKind::Battery,
            Box::new(Scripted(reads.into())),
            crate::DEFAULT_BUFFER_CAPACITY,
        )
    }

    #[test]
    fn test_normalize_cuts_at_newline() {
        assert_eq!(normalize(b"3.7\nEXTRA", 31), "3.7");
        assert_eq!(normalize(b"22.5\r\n", 31), "22.5");
        assert_eq!(normalize(b"\n310", 31), "");
        assert_eq!(normalize(b"310", 31), "310");
    }

    #[test]
    fn test_normalize_cuts_at_nul() {
        assert_eq!(normalize(b"4.1\0junk", 31), "4.1");
        assert_eq!(normalize(b"\04.1", 31), "");
    }

    #[test]
    fn test_normalize_truncates() {
        let long = vec![b'9'; 100];
        let value = normalize(&long, 31);
        assert_eq!(value.len(), 31);
        assert!(value.bytes().all(|b| b == b'9'));
    }

    #[test]
    fn test_normalize_keeps_valid_text() {
        // "°" is two bytes; clipping between them must not corrupt the value
        let raw = "22.5°C".as_bytes();
        let value = normalize(raw, 5);
        assert!(value.len() <= 5);
        assert!(value.starts_with("22.5"));

        let garbage = [0xFFu8; 40];
        let value = normalize(&garbage, 31);
        assert!(value.len() <= 31);
    }

    #[test]
    fn test_poll_reports_every_read() {
        let mut reader = scripted(vec![Ok(b"4.1\n".to_vec()), Ok(b"4.1\n".to_vec())]);
        assert_eq!(reader.poll().as_deref(), Some("4.1"));
        // Identical payloads still count as updates
        assert_eq!(reader.poll().as_deref(), Some("4.1"));
        assert_eq!(reader.poll(), None);
    }

    #[test]
    fn test_poll_no_data() {
        let mut reader = scripted(vec![
            Ok(Vec::new()),
            Err(io::Error::from(ErrorKind::WouldBlock)),
            Err(io::Error::from(ErrorKind::BrokenPipe)),
        ]);
        assert_eq!(reader.poll(), None);
        assert_eq!(reader.poll(), None);
        assert_eq!(reader.poll(), None);
        assert_eq!(reader.status(), SourceStatus::Open);
    }

    #[test]
    fn test_poll_oversized_payload() {
        let mut reader = scripted(vec![Ok(vec![b'7'; 64])]);
        let value = reader.poll().unwrap();
        assert_eq!(value.len(), crate::DEFAULT_BUFFER_CAPACITY - 1);
        assert_eq!(reader.max_len(), crate::DEFAULT_BUFFER_CAPACITY - 1);
    }

    #[test]
    fn test_unavailable_is_noop() {
        let opener = |_: usize, _: MetricKind| -> Result<Box<dyn ChannelSource>> {
            Err(Error::Io(io::Error::from(ErrorKind::NotFound)))
        };
        let mut reader = ChannelReader::open(&opener, 4, MetricKind::Light, 32);
        assert_eq!(reader.status(), SourceStatus::Unavailable);
        for _ in 0..10 {
            assert_eq!(reader.poll(), None);
        }
        reader.release();
        assert_eq!(reader.status(), SourceStatus::Unavailable);
    }

    #[test]
    fn test_release_keeps_status() {
        let mut reader = scripted(vec![Ok(b"3.3".to_vec())]);
        reader.release();
        assert_eq!(reader.status(), SourceStatus::Open);
        assert_eq!(reader.poll(), None);
        reader.release();
    }
}
