//! Table content for the sensor view.

use lunix_hw::MetricKind;

use crate::sensors::SensorSnapshot;

/// Marker shown in every metric column of an offline sensor.
pub const OFFLINE: &str = "OFFLINE";

/// Window title.
pub const TITLE: &str = "Lunix:TNG Sensor Monitor (Press 'q' to quit)";

/// Shown under the title while the monitor polls instead of waiting.
pub const DISCLAIMER: &str = "[This version uses Polling - It does not support Wait-Wake]";

/// Footer status line.
pub const STATUS: &str = "Status: Active Polling (O_NONBLOCK)...";

/// Column headers: the ID column followed by one per metric kind.
pub fn header_cells() -> [&'static str; 4] {
    [
        "ID",
        MetricKind::Battery.label(),
        MetricKind::Temperature.label(),
        MetricKind::Light.label(),
    ]
}

/// Label of a sensor row, e.g. "Sensor 07".
pub fn sensor_label(index: usize) -> String {
    format!("Sensor {:02}", index)
}

/// The three metric cells of a row.
pub fn row_cells(snapshot: &SensorSnapshot) -> [String; 3] {
    if snapshot.online {
        MetricKind::ALL.map(|kind| snapshot.value(kind).to_string())
    } else {
        MetricKind::ALL.map(|_| OFFLINE.to_string())
    }
}

/// Footer text with the number of online sensors.
pub fn footer(snapshots: &[SensorSnapshot]) -> String {
    let online = snapshots.iter().filter(|s| s.online).count();
    format!("{} {}/{} online", STATUS, online, snapshots.len())
}
