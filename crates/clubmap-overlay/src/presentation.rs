//! How a club looks on the map: logo icon, popup content and the failure
//! line shown when it cannot be placed.

use clubmap_core::{Championship, Club};
use serde::Serialize;

use crate::surface::ErrorSurface;

const ICON_SIZE: [u32; 2] = [50, 50];
/// Icon is centred on the club position.
const ICON_ANCHOR: [i32; 2] = [25, 25];
/// Popup opens just above the icon.
const POPUP_ANCHOR: [i32; 2] = [0, -25];

/// Marker icon description handed to the map surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    /// Club logo URL; `None` lets the surface use its default pin.
    pub url: Option<String>,
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

impl MarkerIcon {
    /// Builds the logo icon for `club` from the CDN root `icon_base_url`.
    #[must_use]
    pub fn for_club(club: &Club, icon_base_url: &str) -> Self {
        let url = club.affiliation_number.map(|affiliation| {
            format!(
                "{}/BC{affiliation}.jpg",
                icon_base_url.trim_end_matches('/')
            )
        });
        Self {
            url,
            size: ICON_SIZE,
            anchor: ICON_ANCHOR,
            popup_anchor: POPUP_ANCHOR,
        }
    }
}

/// Popup body: club name in bold, then the championship name.
#[must_use]
pub fn popup_html(club: &Club, championship: &Championship) -> String {
    format!(
        "<b>{}</b><br>{}<br>",
        escape_html(&club.name),
        escape_html(&championship.name)
    )
}

/// One user-facing line for a club that could not be placed.
#[must_use]
pub fn failure_line(club: &Club, championship: &Championship) -> String {
    format!(
        "cannot load coordinates for: {} ({})",
        club.name, championship.name
    )
}

/// Escapes text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Error surface that keeps the failure list both as plain lines and as the
/// `<li>` markup of an HTML list.
#[derive(Debug, Default, Clone)]
pub struct ErrorListHtml {
    lines: Vec<String>,
    html: String,
}

impl ErrorListHtml {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}

impl ErrorSurface for ErrorListHtml {
    fn set_error_list(&mut self, lines: &[String]) {
        self.lines = lines.to_vec();
        self.html = lines
            .iter()
            .map(|line| format!("<li>{}</li>", escape_html(line)))
            .collect();
    }
}
