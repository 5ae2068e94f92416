// In-memory traffic store - one recorder per configured route
use crate::application::traffic_recorder::TrafficRecorder;
use crate::application::traffic_repository::TrafficRepository;
use crate::domain::route::{Route, RouteSummary};
use crate::domain::traffic::{ByteCount, TrafficSnapshot};
use anyhow::Result;
use async_trait::async_trait;
use chrono::TimeDelta;
use std::collections::HashMap;

#[derive(Debug)]
struct RouteEntry {
    route: Route,
    recorder: TrafficRecorder,
}

#[derive(Debug)]
pub struct InMemoryTrafficStore {
    // Insertion order of the configured routes, for stable listings.
    order: Vec<String>,
    entries: HashMap<String, RouteEntry>,
}

impl InMemoryTrafficStore {
    pub fn new(routes: impl IntoIterator<Item = Route>, bucket: TimeDelta, max_points: usize) -> Self {
        let mut order = Vec::new();
        let mut entries = HashMap::new();

        for route in routes {
            if entries.contains_key(&route.id) {
                tracing::warn!("Ignoring duplicate route {}", route.id);
                continue;
            }
            order.push(route.id.clone());
            entries.insert(
                route.id.clone(),
                RouteEntry {
                    route,
                    recorder: TrafficRecorder::new(bucket, max_points),
                },
            );
        }

        tracing::info!("Tracking traffic for {} routes", order.len());
        Self { order, entries }
    }

    /// Direct access to a route's recorder for in-process producers.
    pub fn recorder(&self, route_id: &str) -> Option<&TrafficRecorder> {
        self.entries.get(route_id).map(|entry| &entry.recorder)
    }
}

#[async_trait]
impl TrafficRepository for InMemoryTrafficStore {
    async fn list_routes(&self) -> Result<Vec<RouteSummary>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| RouteSummary {
                route: entry.route.clone(),
                total: entry.recorder.total(),
            })
            .collect())
    }

    async fn snapshot(&self, route_id: &str) -> Result<Option<(Route, TrafficSnapshot)>> {
        Ok(self
            .entries
            .get(route_id)
            .map(|entry| (entry.route.clone(), entry.recorder.snapshot())))
    }

    async fn record(&self, route_id: &str, count: ByteCount) -> Result<bool> {
        match self.recorder(route_id) {
            Some(recorder) => {
                recorder.record(count);
                tracing::debug!(
                    "Recorded {} sent / {} received bytes for route {}",
                    count.sent,
                    count.received,
                    route_id
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
