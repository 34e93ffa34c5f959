// 🗺️ Map Layer
// Markers and heat points derived from the region price view

use crate::aggregate::RegionPriceView;
use crate::colormap::{LinearColormap, Rgb};
use crate::format::popup_line;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Initial map center (latitude, longitude)
pub const MUMBAI_CENTER: (f64, f64) = (19.0760, 72.8777);
pub const DEFAULT_ZOOM: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapStyle {
    #[default]
    #[serde(rename = "OpenStreetMap")]
    OpenStreetMap,
    #[serde(rename = "CartoDB positron")]
    CartoPositron,
    #[serde(rename = "CartoDB dark_matter")]
    CartoDarkMatter,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [
        MapStyle::OpenStreetMap,
        MapStyle::CartoPositron,
        MapStyle::CartoDarkMatter,
    ];

    /// Tile set name as map libraries know it
    pub fn tiles(&self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "OpenStreetMap",
            MapStyle::CartoPositron => "CartoDB positron",
            MapStyle::CartoDarkMatter => "CartoDB dark_matter",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            MapStyle::OpenStreetMap => MapStyle::CartoPositron,
            MapStyle::CartoPositron => MapStyle::CartoDarkMatter,
            MapStyle::CartoDarkMatter => MapStyle::OpenStreetMap,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, MapStyle::CartoDarkMatter)
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tiles())
    }
}

impl FromStr for MapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        MapStyle::ALL
            .into_iter()
            .find(|style| {
                let tiles = style.tiles().to_lowercase().replace('_', " ");
                tiles == wanted || tiles.ends_with(&format!(" {}", wanted))
            })
            .ok_or_else(|| format!("unknown map style '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "Circle Markers")]
    CircleMarkers,
    #[serde(rename = "Heatmap")]
    Heatmap,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::CircleMarkers => "Circle Markers",
            ViewMode::Heatmap => "Heatmap",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ViewMode::CircleMarkers => ViewMode::Heatmap,
            ViewMode::Heatmap => ViewMode::CircleMarkers,
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "circle markers" | "circles" | "markers" => Ok(ViewMode::CircleMarkers),
            "heatmap" | "heat" => Ok(ViewMode::Heatmap),
            _ => Err(format!("unknown view mode '{}'", s)),
        }
    }
}

/// One colored circle on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub region: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub median_price: Option<f64>,
    pub color: Rgb,
    pub popup: String,
}

/// Color scale spanning the known medians of the whole view
pub fn price_colormap(view: &RegionPriceView) -> LinearColormap {
    let (lo, hi) = view.price_range().unwrap_or((0.0, 0.0));
    LinearColormap::price_scale(lo, hi)
}

/// Markers for the selected regions (all when the selection is empty)
pub fn markers<S: AsRef<str>>(view: &RegionPriceView, selected: &[S]) -> Vec<MapMarker> {
    let scale = price_colormap(view);
    view.filter(selected)
        .into_iter()
        .map(|row| MapMarker {
            region: row.region.clone(),
            label: row.label.clone(),
            latitude: row.latitude,
            longitude: row.longitude,
            median_price: row.median_price,
            color: scale.color_for(row.median_price),
            popup: popup_line(row.median_price),
        })
        .collect()
}
