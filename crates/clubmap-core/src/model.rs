//! Domain types shared by the gateway, the overlay and the CLI.
//!
//! These are the decoded, validated shapes. The federation API's wire
//! records live in `clubmap-fff` and are converted into these at the
//! gateway boundary.

use serde::{Deserialize, Serialize};

/// A championship the user can toggle on the map.
///
/// The `id` comes from the toggle UI; the `name` is the competition name
/// reported by the engagement that brought a club onto the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Championship {
    pub id: String,
    pub name: String,
}

impl Championship {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A pool within the first phase of a championship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool number used as `poule.gp_no` when listing engagements.
    pub stage_number: u32,
}

/// A club's registered participation in a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Federation club number (`cl_no`).
    pub club_id: u64,
    /// Display name of the competition the pool belongs to.
    pub competition_name: String,
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A football club as returned by the federation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: u64,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Federation affiliation number, used to build the logo URL.
    pub affiliation_number: Option<u64>,
}

impl Club {
    /// Returns the club's position when it can be plotted.
    ///
    /// Both coordinates must be present, finite and non-zero. The API uses
    /// `0` as a "no GPS" sentinel, so a zero on either axis counts as missing.
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        let lat = self.latitude.filter(|v| is_usable_coordinate(*v))?;
        let lng = self.longitude.filter(|v| is_usable_coordinate(*v))?;
        Some(LatLng::new(lat, lng))
    }
}

fn is_usable_coordinate(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// A checkbox change coming from the toggle UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub championship_id: String,
    pub enabled: bool,
}

impl ToggleEvent {
    pub fn enabled(championship_id: impl Into<String>) -> Self {
        Self {
            championship_id: championship_id.into(),
            enabled: true,
        }
    }

    pub fn disabled(championship_id: impl Into<String>) -> Self {
        Self {
            championship_id: championship_id.into(),
            enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(latitude: Option<f64>, longitude: Option<f64>) -> Club {
        Club {
            id: 1,
            name: "FC Test".to_string(),
            latitude,
            longitude,
            affiliation_number: Some(500_001),
        }
    }

    #[test]
    fn position_requires_both_coordinates() {
        assert_eq!(
            club(Some(45.0), Some(2.0)).position(),
            Some(LatLng::new(45.0, 2.0))
        );
        assert!(club(None, Some(2.0)).position().is_none());
        assert!(club(Some(45.0), None).position().is_none());
        assert!(club(None, None).position().is_none());
    }

    #[test]
    fn zero_coordinate_is_treated_as_missing() {
        assert!(club(Some(0.0), Some(2.0)).position().is_none());
        assert!(club(Some(45.0), Some(0.0)).position().is_none());
        assert!(club(Some(0.0), Some(0.0)).position().is_none());
    }

    #[test]
    fn non_finite_coordinate_is_treated_as_missing() {
        assert!(club(Some(f64::NAN), Some(2.0)).position().is_none());
        assert!(club(Some(45.0), Some(f64::INFINITY)).position().is_none());
    }

    #[test]
    fn negative_coordinates_are_valid() {
        assert_eq!(
            club(Some(-21.1), Some(-55.5)).position(),
            Some(LatLng::new(-21.1, -55.5))
        );
    }

    #[test]
    fn toggle_event_constructors() {
        assert!(ToggleEvent::enabled("101").enabled);
        assert!(!ToggleEvent::disabled("101").enabled);
        assert_eq!(ToggleEvent::disabled("101").championship_id, "101");
    }

    #[test]
    fn club_serializes_missing_coordinates_as_null() {
        let json = serde_json::to_value(club(None, Some(2.0))).unwrap();
        assert!(json["latitude"].is_null());
        assert_eq!(json["longitude"], 2.0);
    }
}
