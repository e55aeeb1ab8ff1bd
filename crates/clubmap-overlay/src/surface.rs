//! Rendering seams. The overlay never draws anything itself; it asks a map
//! surface to place or drop markers and an error surface to show the
//! current geocode failure list.

use clubmap_core::LatLng;

use crate::presentation::MarkerIcon;

/// A map that can show and hide markers.
pub trait MapSurface {
    /// Opaque reference to a placed marker, handed back on removal.
    type Handle;

    fn add_marker(&mut self, position: LatLng, icon: &MarkerIcon, popup_html: &str)
        -> Self::Handle;

    fn remove_marker(&mut self, handle: Self::Handle);
}

/// Displays the geocode failure list. Each call replaces the previous list.
pub trait ErrorSurface {
    fn set_error_list(&mut self, lines: &[String]);
}
