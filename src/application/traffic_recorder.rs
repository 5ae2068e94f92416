// Traffic recorder - Bucketed byte counters for a single route
use crate::domain::traffic::{ByteCount, Sample, TrafficSnapshot};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_BUCKET: TimeDelta = TimeDelta::seconds(1);
pub const DEFAULT_MAX_POINTS: usize = 1000;

#[derive(Debug)]
struct TrafficLog {
    points: VecDeque<(DateTime<Utc>, ByteCount)>,
    total: ByteCount,
}

/// Accumulates transferred bytes into fixed-width time buckets, keeping at
/// most `max_points` of the most recent buckets.
#[derive(Debug)]
pub struct TrafficRecorder {
    bucket: TimeDelta,
    max_points: usize,
    log: Mutex<TrafficLog>,
}

impl Default for TrafficRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET, DEFAULT_MAX_POINTS)
    }
}

impl TrafficRecorder {
    pub fn new(bucket: TimeDelta, max_points: usize) -> Self {
        Self {
            bucket,
            max_points: max_points.max(1),
            log: Mutex::new(TrafficLog {
                points: VecDeque::with_capacity(max_points.min(DEFAULT_MAX_POINTS)),
                total: ByteCount::default(),
            }),
        }
    }

    pub fn record(&self, count: ByteCount) {
        self.record_at(Utc::now(), count);
    }

    pub fn record_at(&self, now: DateTime<Utc>, count: ByteCount) {
        let bucket_start = truncate(now, self.bucket);
        let mut guard = self.lock();
        let log = &mut *guard;

        match log.points.back_mut() {
            Some((timestamp, current)) if *timestamp == bucket_start => {
                *current = *current + count;
            }
            _ => log.points.push_back((bucket_start, count)),
        }

        while log.points.len() > self.max_points {
            log.points.pop_front();
        }

        log.total = log
            .points
            .iter()
            .fold(ByteCount::default(), |acc, (_, bucket)| acc + *bucket);
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        let log = self.lock();
        TrafficSnapshot {
            points: log
                .points
                .iter()
                .map(|(timestamp, count)| Sample::new(*timestamp, (*count).into()))
                .collect(),
            total: log.total,
        }
    }

    pub fn total(&self) -> ByteCount {
        self.lock().total
    }

    fn lock(&self) -> MutexGuard<'_, TrafficLog> {
        // Plain counters stay valid after a panicking holder.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Round `timestamp` down to a multiple of `bucket` since the Unix epoch.
fn truncate(timestamp: DateTime<Utc>, bucket: TimeDelta) -> DateTime<Utc> {
    let bucket_ms = bucket.num_milliseconds();
    if bucket_ms <= 0 {
        return timestamp;
    }

    let millis = timestamp.timestamp_millis();
    DateTime::from_timestamp_millis(millis - millis.rem_euclid(bucket_ms)).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traffic::CounterPair;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_truncate() {
        let ts = t0() + TimeDelta::milliseconds(61_500);
        assert_eq!(truncate(ts, TimeDelta::seconds(1)), t0() + TimeDelta::seconds(61));
        assert_eq!(truncate(ts, TimeDelta::minutes(1)), t0() + TimeDelta::minutes(1));
        assert_eq!(truncate(ts, TimeDelta::zero()), ts);
    }

    #[test]
    fn test_same_bucket_accumulates() {
        let recorder = TrafficRecorder::new(TimeDelta::seconds(1), 10);
        recorder.record_at(t0(), ByteCount::sent(100));
        recorder.record_at(t0() + TimeDelta::milliseconds(400), ByteCount::received(50));
        recorder.record_at(t0() + TimeDelta::milliseconds(999), ByteCount::new(1, 2));

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.points.len(), 1);
        assert_eq!(snapshot.points[0].timestamp, t0());
        assert_eq!(snapshot.points[0].value, CounterPair::new(101.0, 52.0));
        assert_eq!(snapshot.total, ByteCount::new(101, 52));
    }

    #[test]
    fn test_new_bucket_appends() {
        let recorder = TrafficRecorder::new(TimeDelta::seconds(1), 10);
        recorder.record_at(t0(), ByteCount::sent(10));
        recorder.record_at(t0() + TimeDelta::seconds(3), ByteCount::sent(20));

        let snapshot = recorder.snapshot();
        let timestamps: Vec<_> = snapshot.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![t0(), t0() + TimeDelta::seconds(3)]);
        assert_eq!(snapshot.total, ByteCount::sent(30));
    }

    #[test]
    fn test_oldest_points_evicted() {
        let recorder = TrafficRecorder::new(TimeDelta::seconds(1), 3);
        for i in 0..5 {
            recorder.record_at(t0() + TimeDelta::seconds(i), ByteCount::new(1, i as u64));
        }

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.points.len(), 3);
        assert_eq!(snapshot.points[0].timestamp, t0() + TimeDelta::seconds(2));
        // Total only covers retained points.
        assert_eq!(snapshot.total, ByteCount::new(3, 2 + 3 + 4));
        assert_eq!(recorder.total(), snapshot.total);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let recorder = TrafficRecorder::default();
        recorder.record_at(t0(), ByteCount::sent(1));
        let before = recorder.snapshot();

        recorder.record_at(t0() + TimeDelta::seconds(5), ByteCount::sent(1));

        assert_eq!(before.points.len(), 1);
        assert_eq!(recorder.snapshot().points.len(), 2);
    }

    #[test]
    fn test_concurrent_recording() {
        let recorder = Arc::new(TrafficRecorder::new(TimeDelta::minutes(1), 10));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let recorder = recorder.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        recorder.record_at(t0(), ByteCount::new(1, 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.total(), ByteCount::new(800, 1600));
    }

    #[test]
    fn test_record_uses_wall_clock() {
        let recorder = TrafficRecorder::default();
        recorder.record(ByteCount::sent(7));
        recorder.record(ByteCount::received(3));

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.total, ByteCount::new(7, 3));
        assert!(!snapshot.points.is_empty());
    }
}
