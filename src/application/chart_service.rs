// Chart service - Use case for building normalized traffic charts
use crate::application::error::{Result, TrafficError};
use crate::application::normalization::{normalize, NormalizationSettings};
use crate::application::traffic_repository::TrafficRepository;
use crate::domain::chart::{ChartPoint, TrafficChart};
use crate::domain::format::LabelPrecision;
use crate::domain::route::RouteSummary;
use crate::domain::traffic::ByteCount;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrafficChartService {
    repository: Arc<dyn TrafficRepository>,
    settings: NormalizationSettings,
}

impl TrafficChartService {
    pub fn new(repository: Arc<dyn TrafficRepository>, settings: NormalizationSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub async fn routes(&self) -> Result<Vec<RouteSummary>> {
        Ok(self.repository.list_routes().await?)
    }

    pub async fn chart(&self, route_id: &str) -> Result<TrafficChart> {
        // The clock is read once so the whole chart shares one window.
        self.chart_at(route_id, Utc::now()).await
    }

    pub async fn chart_at(&self, route_id: &str, now: DateTime<Utc>) -> Result<TrafficChart> {
        let (route, snapshot) = self
            .repository
            .snapshot(route_id)
            .await?
            .ok_or_else(|| TrafficError::RouteNotFound(route_id.to_string()))?;

        let normalized = normalize(&snapshot.points, now, &self.settings);
        tracing::debug!(
            "Normalized {} raw points into {} chart points for route {}",
            snapshot.points.len(),
            normalized.len(),
            route_id
        );

        let precision = self.label_precision();
        let points = normalized
            .into_iter()
            .map(|sample| ChartPoint::new(sample, precision))
            .collect();

        let chart = TrafficChart::new(route, snapshot.total, points);
        if chart.is_empty() {
            tracing::debug!(
                "No traffic within the last {}s for route {}",
                self.settings.window.num_seconds(),
                route_id
            );
        }
        Ok(chart)
    }

    pub async fn record(&self, route_id: &str, count: ByteCount) -> Result<()> {
        if self.repository.record(route_id, count).await? {
            Ok(())
        } else {
            Err(TrafficError::RouteNotFound(route_id.to_string()))
        }
    }

    /// Sub-minute ticks need seconds on the axis to tell points apart.
    fn label_precision(&self) -> LabelPrecision {
        if self.settings.tick.num_milliseconds() % 60_000 == 0 {
            LabelPrecision::Minutes
        } else {
            LabelPrecision::Seconds
        }
    }
}
