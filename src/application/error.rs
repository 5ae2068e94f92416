use thiserror::Error;

/// Errors surfaced by the traffic chart use cases.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

pub type Result<T, E = TrafficError> = std::result::Result<T, E>;
