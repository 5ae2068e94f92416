use crate::application::normalization::{NormalizationSettings, DEFAULT_SMOOTHING_WINDOW};
use crate::domain::route::Route;
use chrono::TimeDelta;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TrafficConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizationConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u32,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            tick_secs: default_tick_secs(),
            smoothing_window: default_smoothing_window(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecorderConfig {
    #[serde(default = "default_bucket_secs")]
    pub bucket_secs: u32,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            bucket_secs: default_bucket_secs(),
            max_points: default_max_points(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouteConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

fn default_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_window_secs() -> u32 {
    600
}

fn default_tick_secs() -> u32 {
    60
}

fn default_smoothing_window() -> usize {
    DEFAULT_SMOOTHING_WINDOW
}

fn default_bucket_secs() -> u32 {
    1
}

fn default_max_points() -> usize {
    1000
}

impl NormalizationConfig {
    pub fn to_settings(&self) -> NormalizationSettings {
        NormalizationSettings {
            window: TimeDelta::seconds(i64::from(self.window_secs)),
            tick: TimeDelta::seconds(i64::from(self.tick_secs)),
            smoothing_window: self.smoothing_window,
        }
    }
}

impl RecorderConfig {
    pub fn bucket(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.bucket_secs))
    }
}

impl RouteConfig {
    pub fn to_route(&self) -> Route {
        Route::new(self.id.clone(), self.name.clone())
    }
}

impl TrafficConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.normalization.tick_secs == 0 {
            anyhow::bail!("normalization.tick_secs must be at least 1");
        }
        if self.normalization.window_secs < self.normalization.tick_secs {
            anyhow::bail!("normalization.window_secs must not be shorter than tick_secs");
        }
        if self.normalization.smoothing_window == 0 {
            anyhow::bail!("normalization.smoothing_window must be at least 1");
        }
        if self.recorder.bucket_secs == 0 || self.recorder.max_points == 0 {
            anyhow::bail!("recorder.bucket_secs and recorder.max_points must be positive");
        }

        let mut seen = std::collections::HashSet::new();
        for route in &self.routes {
            if route.id.trim().is_empty() {
                anyhow::bail!("route ids must not be empty");
            }
            if !seen.insert(route.id.as_str()) {
                anyhow::bail!("duplicate route id: {}", route.id);
            }
        }

        Ok(())
    }
}

/// Load `config/traffic.*` overlaid with `TRAFFIC__SECTION__KEY` environment variables
pub fn load_traffic_config() -> anyhow::Result<TrafficConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/traffic").required(false))
        .add_source(config::Environment::with_prefix("TRAFFIC").separator("__"))
        .build()?;

    let traffic: TrafficConfig = settings.try_deserialize()?;
    traffic.validate()?;
    Ok(traffic)
}
