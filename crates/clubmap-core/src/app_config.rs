use serde::Serialize;

use crate::model::LatLng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Initial viewport and tile layer of the rendered map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(46.71109, 1.719_103_6),
            zoom: 6,
            tile_url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution:
                "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the federation API, without a trailing slash.
    pub api_base_url: String,
    /// Optional relay prefix; the encoded target URL is appended to it.
    pub relay_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Root of the club logo CDN.
    pub icon_base_url: String,
    pub map_view: MapView,
}
