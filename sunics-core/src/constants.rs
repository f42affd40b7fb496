/// Where the map starts out before the user picks anything.
pub struct DefaultLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub label: &'static str,
}

pub const DEFAULT_LOCATION: DefaultLocation = DefaultLocation {
    latitude: 46.9519,
    longitude: 7.4603,
    zoom: 10,
    label: "Rosengarten, Bern, Schweiz",
};

/// Recentering never zooms out past this level.
pub const RECENTER_MIN_ZOOM: u8 = 10;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_MAX_ZOOM: u8 = 19;
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub const SEARCH_RESULT_LIMIT: usize = 5;
pub const RESULT_TITLE_MAX_CHARS: usize = 120;
pub const SELECTED_LABEL_MAX_CHARS: usize = 90;

pub const DEFAULT_SUNRISE_TITLE: &str = "Sunrise";
pub const DEFAULT_SUNSET_TITLE: &str = "Sunset";
pub const DEFAULT_DURATION_MINUTES: &str = "30";

pub const DOWNLOAD_FILENAME: &str = "sun-events.ics";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
