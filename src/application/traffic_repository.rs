// Repository trait for route traffic access
use crate::domain::route::{Route, RouteSummary};
use crate::domain::traffic::{ByteCount, TrafficSnapshot};
use async_trait::async_trait;

#[async_trait]
pub trait TrafficRepository: Send + Sync {
    /// List all known routes with their retained traffic totals
    async fn list_routes(&self) -> anyhow::Result<Vec<RouteSummary>>;

    /// Raw recorded series for a route, `None` if the route is unknown
    async fn snapshot(&self, route_id: &str) -> anyhow::Result<Option<(Route, TrafficSnapshot)>>;

    /// Add transferred bytes to a route; returns `false` if the route is unknown
    async fn record(&self, route_id: &str, count: ByteCount) -> anyhow::Result<bool>;
}
