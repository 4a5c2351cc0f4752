//! Map section contents. Drawing tiles is left to whatever map widget the
//! front end embeds; this only says where to look and what to pin.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

pub const SANTIAGO: GeoPoint = GeoPoint {
    lat: -33.45694,
    lon: -70.64827,
};

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub position: GeoPoint,
    pub title: String,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Tile URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub tiles: &'static str,
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            tiles: TILE_URL,
            center: SANTIAGO,
            zoom: 5,
            markers: vec![MapMarker {
                position: SANTIAGO,
                title: "Santiago de Chile".to_string(),
                popup: "Evento central.".to_string(),
            }],
        }
    }
}
