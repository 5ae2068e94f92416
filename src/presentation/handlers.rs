// HTTP request handlers
use crate::application::error::TrafficError;
use crate::domain::chart::TotalLabels;
use crate::domain::route::RouteSummary;
use crate::domain::traffic::ByteCount;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteListing {
    pub id: String,
    pub name: String,
    pub total: ByteCount,
    pub total_labels: TotalLabels,
}

impl From<RouteSummary> for RouteListing {
    fn from(summary: RouteSummary) -> Self {
        Self {
            name: summary.route.display_name().to_string(),
            id: summary.route.id,
            total: summary.total,
            total_labels: TotalLabels::from(summary.total),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all routes with their traffic totals
pub async fn list_routes(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.chart_service.routes().await {
        Ok(routes) => {
            let listings: Vec<RouteListing> = routes.into_iter().map(RouteListing::from).collect();
            respond(json_response(&listings, accepts_brotli(&headers)).await)
        }
        Err(e) => error_response(e),
    }
}

/// Normalized traffic chart for a single route
pub async fn traffic_chart(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.chart_service.chart(&id).await {
        Ok(chart) => respond(json_response(&chart, accepts_brotli(&headers)).await),
        Err(e) => error_response(e),
    }
}

/// Add transferred bytes to a route
pub async fn record_traffic(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(count): Json<ByteCount>,
) -> Response {
    match state.chart_service.record(&id, count).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn respond(result: Result<Response, StatusCode>) -> Response {
    result.unwrap_or_else(|status| status.into_response())
}

fn error_response(error: TrafficError) -> Response {
    match error {
        TrafficError::RouteNotFound(id) => {
            tracing::debug!("Unknown route requested: {}", id);
            StatusCode::NOT_FOUND.into_response()
        }
        TrafficError::Repository(e) => {
            tracing::error!("Traffic repository error: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::TrafficChartService;
    use crate::application::normalization::NormalizationSettings;
    use crate::domain::route::Route;
    use crate::infrastructure::memory_store::InMemoryTrafficStore;
    use axum::body::to_bytes;
    use chrono::TimeDelta;

    fn state() -> Arc<AppState> {
        let store = InMemoryTrafficStore::new(
            vec![Route::new("web", "Web"), Route::new("db", "")],
            TimeDelta::seconds(1),
            100,
        );
        Arc::new(AppState {
            chart_service: TrafficChartService::new(Arc::new(store), NormalizationSettings::default()),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_routes() {
        let state = state();
        state
            .chart_service
            .record("web", ByteCount::new(2048, 0))
            .await
            .unwrap();

        let response = list_routes(HeaderMap::new(), State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["Id"], "web");
        assert_eq!(json[0]["Total"]["Sent"], 2048);
        assert_eq!(json[0]["TotalLabels"]["Sent"], "2 KB");
        assert_eq!(json[1]["Name"], "db");
    }

    #[tokio::test]
    async fn test_record_then_chart() {
        let state = state();

        let response = record_traffic(
            Path("web".to_string()),
            State(state.clone()),
            Json(ByteCount::new(100, 50)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = traffic_chart(Path("web".to_string()), HeaderMap::new(), State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["Title"], "Web traffic");
        let points = json["Points"].as_array().unwrap();
        assert!(!points.is_empty());
        assert_eq!(points[0]["Value"]["Sent"], 100.0);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = state();

        let response = traffic_chart(Path("nope".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            record_traffic(Path("nope".to_string()), State(state), Json(ByteCount::sent(1))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
