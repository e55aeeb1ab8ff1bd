//! Bookkeeping for everything the overlay currently shows.
//!
//! The registry owns the map surface. Markers and geocode failures are kept
//! in insertion order and tagged with the championship that produced them,
//! so a championship can be withdrawn without touching anyone else's
//! entries.

use clubmap_core::{Championship, Club, LatLng};

use crate::presentation::{failure_line, popup_html, MarkerIcon};
use crate::surface::MapSurface;

/// Longitude shift applied to a club landing exactly on an existing marker.
pub const COLLISION_LNG_OFFSET: f64 = 0.003;

/// A marker currently placed on the map surface.
#[derive(Debug, Clone)]
pub struct PlacedMarker<H> {
    pub championship_id: String,
    pub club_id: u64,
    /// Rendered position, after any collision nudge.
    pub position: LatLng,
    pub handle: H,
}

/// A club that could not be placed because it lacks usable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeFailure {
    pub club: Club,
    pub championship: Championship,
}

pub struct OverlayRegistry<M: MapSurface> {
    map: M,
    icon_base_url: String,
    markers: Vec<PlacedMarker<M::Handle>>,
    errors: Vec<GeocodeFailure>,
}

impl<M: MapSurface> OverlayRegistry<M> {
    pub fn new(map: M, icon_base_url: impl Into<String>) -> Self {
        Self {
            map,
            icon_base_url: icon_base_url.into(),
            markers: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Places `club` on the map for `championship`.
    ///
    /// A club without usable coordinates is recorded as a [`GeocodeFailure`]
    /// and nothing is drawn. A club landing exactly on an already-placed
    /// marker is shifted east by [`COLLISION_LNG_OFFSET`] once; only markers
    /// already in the registry are compared, so three or more clubs sharing
    /// a position can still overlap.
    ///
    /// Returns the rendered position, or `None` for a geocode failure.
    pub fn insert_marker(&mut self, club: &Club, championship: &Championship) -> Option<LatLng> {
        let Some(mut position) = club.position() else {
            tracing::warn!(
                club_id = club.id,
                club = %club.name,
                championship_id = %championship.id,
                "club does not have valid coordinates"
            );
            self.errors.push(GeocodeFailure {
                club: club.clone(),
                championship: championship.clone(),
            });
            return None;
        };

        let collides = self.markers.iter().any(|m| m.position == position);
        if collides {
            position.lng += COLLISION_LNG_OFFSET;
            tracing::debug!(
                club_id = club.id,
                lat = position.lat,
                lng = position.lng,
                "nudged club off an occupied position"
            );
        }

        let icon = MarkerIcon::for_club(club, &self.icon_base_url);
        let popup = popup_html(club, championship);
        let handle = self.map.add_marker(position, &icon, &popup);
        self.markers.push(PlacedMarker {
            championship_id: championship.id.clone(),
            club_id: club.id,
            position,
            handle,
        });
        Some(position)
    }

    /// Withdraws every marker and geocode failure owned by `championship_id`.
    ///
    /// Removed markers are dropped from the map surface; the remaining
    /// entries keep their relative order. Calling it again is a no-op.
    /// Returns the number of markers removed.
    pub fn remove_championship(&mut self, championship_id: &str) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.markers)
            .into_iter()
            .partition(|m| m.championship_id == championship_id);
        self.markers = kept;

        let count = removed.len();
        for marker in removed {
            self.map.remove_marker(marker.handle);
        }

        self.errors
            .retain(|failure| failure.championship.id != championship_id);
        count
    }

    /// One line per geocode failure, in insertion order.
    #[must_use]
    pub fn render_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|failure| failure_line(&failure.club, &failure.championship))
            .collect()
    }

    #[must_use]
    pub fn markers(&self) -> &[PlacedMarker<M::Handle>] {
        &self.markers
    }

    #[must_use]
    pub fn errors(&self) -> &[GeocodeFailure] {
        &self.errors
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Releases the map surface, e.g. to export what is drawn on it.
    pub fn into_map(self) -> M {
        self.map
    }
}
