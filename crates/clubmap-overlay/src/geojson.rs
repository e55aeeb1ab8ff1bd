//! Headless map surface that keeps placed markers as GeoJSON features.

use std::collections::BTreeMap;

use clubmap_core::{LatLng, MapView};
use serde_json::{json, Value};

use crate::presentation::MarkerIcon;
use crate::surface::MapSurface;

/// Handle of a marker placed on a [`GeoJsonMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone)]
struct Feature {
    position: LatLng,
    icon: MarkerIcon,
    popup_html: String,
}

#[derive(Debug, Default)]
pub struct GeoJsonMap {
    next_id: u64,
    features: BTreeMap<MarkerId, Feature>,
}

impl GeoJsonMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[must_use]
    pub fn position(&self, id: MarkerId) -> Option<LatLng> {
        self.features.get(&id).map(|f| f.position)
    }

    /// Renders the markers as a GeoJSON `FeatureCollection`, in placement
    /// order. When `view` is given it is attached as a `view` member.
    #[must_use]
    pub fn to_feature_collection(&self, view: Option<&MapView>) -> Value {
        let features: Vec<Value> = self
            .features
            .iter()
            .map(|(id, feature)| {
                json!({
                    "type": "Feature",
                    "id": id.0,
                    "geometry": {
                        "type": "Point",
                        // GeoJSON positions are [longitude, latitude].
                        "coordinates": [feature.position.lng, feature.position.lat],
                    },
                    "properties": {
                        "icon": feature.icon,
                        "popup": feature.popup_html,
                    },
                })
            })
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let (Some(view), Some(object)) = (view, collection.as_object_mut()) {
            object.insert("view".to_string(), json!(view));
        }
        collection
    }
}

impl MapSurface for GeoJsonMap {
    type Handle = MarkerId;

    fn add_marker(&mut self, position: LatLng, icon: &MarkerIcon, popup_html: &str) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.features.insert(
            id,
            Feature {
                position,
                icon: icon.clone(),
                popup_html: popup_html.to_string(),
            },
        );
        id
    }

    fn remove_marker(&mut self, handle: MarkerId) {
        if self.features.remove(&handle).is_none() {
            tracing::debug!(marker_id = handle.0, "marker already removed");
        }
    }
}
