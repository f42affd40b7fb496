//! Location picking: coordinate fields, the map widget seam and the picker
//! that keeps the two in sync.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::constants::{
    DEFAULT_LOCATION, RECENTER_MIN_ZOOM, TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL_TEMPLATE,
};
use crate::error::{SunicsError, SunicsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// The location as written into the coordinate fields.
    pub fn rounded(self) -> Self {
        Location {
            latitude: round_coordinate(self.latitude),
            longitude: round_coordinate(self.longitude),
        }
    }
}

/// Fixed 6-decimal rendering used for both coordinate fields.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

fn round_coordinate(value: f64) -> f64 {
    format_coordinate(value).parse().unwrap_or(value)
}

fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The latitude/longitude text inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateFields {
    pub latitude: String,
    pub longitude: String,
}

impl CoordinateFields {
    pub fn set(&mut self, location: Location) {
        self.latitude = format_coordinate(location.latitude);
        self.longitude = format_coordinate(location.longitude);
    }

    /// Both fields as numbers, if both hold one.
    pub fn parse(&self) -> Option<Location> {
        Some(Location::new(
            parse_coordinate(&self.latitude)?,
            parse_coordinate(&self.longitude)?,
        ))
    }
}

/// Tile source handed to the map widget at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        TileLayer {
            url_template: TILE_URL_TEMPLATE.to_string(),
            max_zoom: TILE_MAX_ZOOM,
            attribution: TILE_ATTRIBUTION.to_string(),
        }
    }
}

/// The map widget: a view with a center and zoom, plus one marker.
pub trait LocationView {
    fn add_tile_layer(&mut self, layer: &TileLayer);

    fn set_view(&mut self, center: Location, zoom: u8);

    fn zoom(&self) -> u8;

    fn add_marker(&mut self, at: Location);

    fn move_marker(&mut self, to: Location);
}

/// Map without a screen. Records what a real widget would display.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    pub tile_layers: Vec<TileLayer>,
    pub center: Option<Location>,
    pub zoom: u8,
    pub marker: Option<Location>,
}

impl LocationView for HeadlessMap {
    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layers.push(layer.clone());
    }

    fn set_view(&mut self, center: Location, zoom: u8) {
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn add_marker(&mut self, at: Location) {
        self.marker = Some(at);
    }

    fn move_marker(&mut self, to: Location) {
        self.marker = Some(to);
    }
}

/// Keeps the marker and the coordinate fields pointing at the same place.
#[derive(Debug)]
pub struct LocationPicker<V> {
    view: Option<V>,
    has_marker: bool,
    fields: CoordinateFields,
}

impl<V: LocationView> LocationPicker<V> {
    pub fn new(fields: CoordinateFields) -> Self {
        LocationPicker {
            view: None,
            has_marker: false,
            fields,
        }
    }

    /// Attach the map widget and show the default location.
    ///
    /// Without a widget the picker logs the problem and stays map-less for the
    /// rest of the session. The coordinate fields keep working either way.
    pub fn init(&mut self, view: Option<V>) -> SunicsResult<()> {
        let Some(mut view) = view else {
            error!("map widget not available, location picking by map is disabled");
            return Err(SunicsError::MapUnavailable(
                "no map widget was provided".into(),
            ));
        };

        let restored = self.fields.parse();

        view.add_tile_layer(&TileLayer::default());
        let default = Location::new(DEFAULT_LOCATION.latitude, DEFAULT_LOCATION.longitude);
        view.set_view(default, DEFAULT_LOCATION.zoom);
        self.view = Some(view);

        // Already centered there.
        self.set_location(default, false);

        if let Some(location) = restored {
            self.set_location(location, true);
        }

        Ok(())
    }

    /// Write both fields and move the marker, creating it on first use.
    ///
    /// With `pan`, the view is recentered without ever zooming out past
    /// `RECENTER_MIN_ZOOM`.
    pub fn set_location(&mut self, location: Location, pan: bool) {
        let location = location.rounded();
        self.fields.set(location);

        let Some(view) = self.view.as_mut() else {
            return;
        };

        if self.has_marker {
            view.move_marker(location);
        } else {
            view.add_marker(location);
            self.has_marker = true;
        }

        if pan {
            let zoom = view.zoom().max(RECENTER_MIN_ZOOM);
            view.set_view(location, zoom);
        }
    }

    /// A click on the map. Never pans, repeated clicks would otherwise jump.
    pub fn click(&mut self, at: Location) -> String {
        self.set_location(at, false);
        format!(
            "Selected on map: lat {} • lon {}",
            self.fields.latitude, self.fields.longitude
        )
    }

    /// Typed input. The marker stays where it is until the next pick.
    pub fn edit_fields(&mut self, latitude: &str, longitude: &str) {
        self.fields.latitude = latitude.to_string();
        self.fields.longitude = longitude.to_string();
    }

    pub fn fields(&self) -> &CoordinateFields {
        &self.fields
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn has_map(&self) -> bool {
        self.view.is_some()
    }
}
