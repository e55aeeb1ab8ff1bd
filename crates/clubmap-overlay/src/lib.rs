//! Club marker overlay: the registry of placed markers and geocode failures,
//! the surfaces it renders to, and the per-championship toggle controller.

pub mod controller;
pub mod geojson;
pub mod presentation;
pub mod registry;
pub mod surface;

pub use controller::{ToggleController, ToggleOutcome, ToggleState};
pub use geojson::{GeoJsonMap, MarkerId};
pub use presentation::{ErrorListHtml, MarkerIcon};
pub use registry::{GeocodeFailure, OverlayRegistry, PlacedMarker, COLLISION_LNG_OFFSET};
pub use surface::{ErrorSurface, MapSurface};
