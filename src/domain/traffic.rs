// Traffic domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Traffic volume in both directions. Values are continuous so that
/// interpolated and averaged points can carry fractional bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CounterPair {
    pub sent: f64,
    pub received: f64,
}

impl CounterPair {
    pub fn new(sent: f64, received: f64) -> Self {
        Self { sent, received }
    }
}

impl Add for CounterPair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.sent + rhs.sent, self.received + rhs.received)
    }
}

impl Sub for CounterPair {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.sent - rhs.sent, self.received - rhs.received)
    }
}

impl Mul<f64> for CounterPair {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.sent * rhs, self.received * rhs)
    }
}

impl Div<f64> for CounterPair {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.sent / rhs, self.received / rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: CounterPair,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: CounterPair) -> Self {
        Self { timestamp, value }
    }
}

/// Exact byte counts as accumulated by the recorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByteCount {
    #[serde(default, alias = "sent")]
    pub sent: u64,
    #[serde(default, alias = "received")]
    pub received: u64,
}

impl ByteCount {
    pub fn new(sent: u64, received: u64) -> Self {
        Self { sent, received }
    }

    pub fn sent(bytes: u64) -> Self {
        Self::new(bytes, 0)
    }

    pub fn received(bytes: u64) -> Self {
        Self::new(0, bytes)
    }
}

impl Add for ByteCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.sent.saturating_add(rhs.sent),
            self.received.saturating_add(rhs.received),
        )
    }
}

impl From<ByteCount> for CounterPair {
    fn from(count: ByteCount) -> Self {
        CounterPair::new(count.sent as f64, count.received as f64)
    }
}

/// Point-in-time copy of a recorder's retained points and their total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficSnapshot {
    pub points: Vec<Sample>,
    pub total: ByteCount,
}
