pub mod app_config;
pub mod config;
pub mod model;
pub mod source;

pub use app_config::{AppConfig, Environment, MapView};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{Championship, Club, Engagement, LatLng, Pool, ToggleEvent};
pub use source::ClubSource;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
