use crate::app_config::{AppConfig, Environment, MapView};
use crate::model::LatLng;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api-dofa.prd-aws.fff.fr/api";
pub const DEFAULT_ICON_BASE_URL: &str = "https://cdn-transverse.azureedge.net/phlogos";
pub const DEFAULT_USER_AGENT: &str = "clubmap/0.1 (club-overlay)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u8 = |var: &str, default: u8| -> Result<u8, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u8>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => {
                let value = raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(invalid(var, "must be a finite number".to_string()))
                }
            }
            Err(_) => Ok(default),
        }
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.to_string())
        } else {
            Err(invalid(var, format!("'{raw}' is not an http(s) URL")))
        }
    };

    let env = parse_environment(&or_default("CLUBMAP_ENV", "development"));
    let log_level = or_default("CLUBMAP_LOG_LEVEL", "info");
    let api_base_url = parse_url("CLUBMAP_API_BASE_URL", DEFAULT_API_BASE_URL)?;
    let icon_base_url = parse_url("CLUBMAP_ICON_BASE_URL", DEFAULT_ICON_BASE_URL)?;

    // The relay prefix is used verbatim (it usually ends in `?`), so it is
    // only checked for a scheme, never trimmed.
    let relay_url = match lookup("CLUBMAP_RELAY_URL") {
        Ok(raw) if raw.trim().is_empty() => None,
        Ok(raw) => {
            let raw = raw.trim().to_string();
            if !(raw.starts_with("http://") || raw.starts_with("https://")) {
                return Err(invalid(
                    "CLUBMAP_RELAY_URL",
                    format!("'{raw}' is not an http(s) URL"),
                ));
            }
            Some(raw)
        }
        Err(_) => None,
    };

    let request_timeout_secs = parse_u64("CLUBMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CLUBMAP_USER_AGENT", DEFAULT_USER_AGENT);

    let defaults = MapView::default();
    let center = LatLng::new(
        parse_f64("CLUBMAP_MAP_CENTER_LAT", defaults.center.lat)?,
        parse_f64("CLUBMAP_MAP_CENTER_LNG", defaults.center.lng)?,
    );
    let zoom = parse_u8("CLUBMAP_MAP_ZOOM", defaults.zoom)?;
    if zoom > defaults.max_zoom {
        return Err(invalid(
            "CLUBMAP_MAP_ZOOM",
            format!("zoom {zoom} exceeds max zoom {}", defaults.max_zoom),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        relay_url,
        request_timeout_secs,
        user_agent,
        icon_base_url,
        map_view: MapView {
            center,
            zoom,
            ..defaults
        },
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
