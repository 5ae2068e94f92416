// Chart domain model handed to the charting client
use serde::Serialize;

use super::format::{format_axis_label, format_bytes, LabelPrecision};
use super::route::Route;
use super::traffic::{ByteCount, Sample};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartPoint {
    #[serde(flatten)]
    pub sample: Sample,
    pub label: String,
}

impl ChartPoint {
    pub fn new(sample: Sample, precision: LabelPrecision) -> Self {
        let label = format_axis_label(sample.timestamp, precision);
        Self { sample, label }
    }
}

/// Formatted totals for the statistics header above a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TotalLabels {
    pub sent: String,
    pub received: String,
}

impl From<ByteCount> for TotalLabels {
    fn from(total: ByteCount) -> Self {
        Self {
            sent: format_bytes(total.sent as f64),
            received: format_bytes(total.received as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficChart {
    pub route: Route,
    pub title: String,
    pub total: ByteCount,
    pub total_labels: TotalLabels,
    pub points: Vec<ChartPoint>,
}

impl TrafficChart {
    pub fn new(route: Route, total: ByteCount, points: Vec<ChartPoint>) -> Self {
        let title = format!("{} traffic", route.display_name());
        Self {
            route,
            title,
            total,
            total_labels: TotalLabels::from(total),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traffic::CounterPair;
    use chrono::DateTime;

    #[test]
    fn test_chart_point_json() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let point = ChartPoint::new(
            Sample::new(ts, CounterPair::new(10.0, 20.0)),
            LabelPrecision::Minutes,
        );

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["Label"], "22:13");
        assert_eq!(json["Value"]["Received"], 20.0);
        assert!(json.get("Timestamp").is_some());
    }

    #[test]
    fn test_chart_title_and_totals() {
        let chart = TrafficChart::new(
            Route::new("db", ""),
            ByteCount::new(2048, 10),
            Vec::new(),
        );

        assert_eq!(chart.title, "db traffic");
        assert_eq!(chart.total_labels.sent, "2 KB");
        assert_eq!(chart.total_labels.received, "10 B");
        assert!(chart.is_empty());
    }
}
