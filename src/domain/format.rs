// Display formatting for chart axes and byte totals
use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPrecision {
    #[default]
    Minutes,
    Seconds,
}

/// X-axis label for a chart point: `HH:MM` or `HH:MM:SS`.
pub fn format_axis_label(timestamp: DateTime<Utc>, precision: LabelPrecision) -> String {
    match precision {
        LabelPrecision::Minutes => timestamp.format("%H:%M").to_string(),
        LabelPrecision::Seconds => timestamp.format("%H:%M:%S").to_string(),
    }
}

/// Human readable byte count using binary multiples, e.g. `2 KB`.
pub fn format_bytes(bytes: f64) -> String {
    if bytes < 1024.0 {
        return format!("{:.0} B", bytes);
    }

    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{:.0} {}", scaled, BYTE_UNITS[unit])
}
