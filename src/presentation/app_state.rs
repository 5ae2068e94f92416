// Application state for HTTP handlers
use crate::application::chart_service::TrafficChartService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: TrafficChartService,
}
