// Domain layer - Traffic samples, routes and chart models
pub mod chart;
pub mod format;
pub mod route;
pub mod traffic;
