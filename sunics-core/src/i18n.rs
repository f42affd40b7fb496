//! Static UI strings and language switching.
//!
//! Elements are tagged with a label key. Applying a language copies the
//! table's text for each key into every element carrying it. Keys missing from
//! the table leave the element alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SunicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    /// Short label shown on the toggle button.
    pub fn short_label(self) -> &'static str {
        match self {
            Language::De => "DE",
            Language::En => "EN",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::De => Language::En,
            Language::En => Language::De,
        }
    }

    pub fn labels(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::De => DE,
            Language::En => EN,
        }
    }

    pub fn translate(self, key: &str) -> Option<&'static str> {
        self.labels()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SunicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Language::De),
            "en" => Ok(Language::En),
            other => Err(SunicsError::Config(format!(
                "Unknown language '{}'. Expected 'de' or 'en'",
                other
            ))),
        }
    }
}

/// Where localized text ends up.
pub trait TextRenderer {
    /// Label keys of all tagged elements.
    fn label_keys(&self) -> Vec<String>;

    /// Replace the text of every element tagged with `key`.
    fn set_label_text(&mut self, key: &str, text: &str);

    fn set_document_language(&mut self, code: &str);

    fn set_toggle_label(&mut self, label: &str);
}

/// Render `language` into `renderer`.
pub fn apply_language<R: TextRenderer + ?Sized>(language: Language, renderer: &mut R) {
    for key in renderer.label_keys() {
        if let Some(text) = language.translate(&key) {
            renderer.set_label_text(&key, text);
        }
    }
    renderer.set_document_language(language.code());
    renderer.set_toggle_label(language.other().short_label());
}

/// One element of a [`LabelSheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelElement {
    pub id: String,
    pub key: Option<String>,
    pub text: String,
}

/// In-memory set of text elements, the terminal's stand-in for a document.
#[derive(Debug, Clone, Default)]
pub struct LabelSheet {
    elements: Vec<LabelElement>,
    document_language: String,
    toggle_label: String,
}

impl LabelSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet with one element per table key, each using the key as its id.
    pub fn with_all_labels() -> Self {
        let mut sheet = Self::new();
        for &(key, _) in DE {
            sheet.push(key, Some(key), "");
        }
        sheet
    }

    pub fn push(&mut self, id: &str, key: Option<&str>, text: &str) {
        self.elements.push(LabelElement {
            id: id.to_string(),
            key: key.map(str::to_string),
            text: text.to_string(),
        });
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.text.as_str())
    }

    /// Text of the first element tagged with `key`.
    pub fn text_for_key(&self, key: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.key.as_deref() == Some(key))
            .map(|e| e.text.as_str())
    }

    pub fn elements(&self) -> &[LabelElement] {
        &self.elements
    }

    pub fn document_language(&self) -> &str {
        &self.document_language
    }

    pub fn toggle_label(&self) -> &str {
        &self.toggle_label
    }
}

impl TextRenderer for LabelSheet {
    fn label_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for key in self.elements.iter().filter_map(|e| e.key.as_ref()) {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        keys
    }

    fn set_label_text(&mut self, key: &str, text: &str) {
        for element in &mut self.elements {
            if element.key.as_deref() == Some(key) {
                element.text = text.to_string();
            }
        }
    }

    fn set_document_language(&mut self, code: &str) {
        self.document_language = code.to_string();
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = label.to_string();
    }
}

const DE: &[(&str, &str)] = &[
    ("title", "Wann ist nochmal Sonnenuntergang?"),
    (
        "intro",
        "Hier kannst du deinen eigenen Sonnenaufgangs- und Sonnenuntergangs-Kalender generieren. Einfach Ort und Datumsbereich wählen und denn Kalender exportieren. Das ics-File kannst du in jedem deiner Kalender importieren.",
    ),
    (
        "intro_2",
        "Ein Tipp: Erstelle einen neuen, leeren Kalender und importiere dort das ics-File. So kannst du bequem alle Sonnenauf- und -untergänge ein- und ausblenden (und den ganzen Kalender löschen, wenn etwas schiefgeht :)).",
    ),
    ("search_label", "Ortssuche"),
    ("search_btn", "Suchen"),
    ("map_label", "Karte (antippen, um Marker zu setzen)"),
    (
        "map_hint",
        "Tipp: Tippe auf die Karte, um den Ort zu setzen, oder nutze die Suchergebnisse oben.",
    ),
    ("lat", "Breitengrad"),
    ("lon", "Längengrad"),
    ("start_date", "Startdatum"),
    ("end_date", "Enddatum"),
    ("duration", "Dauer des Ereignisses im Kalender (Minuten)"),
    ("include", "Ereignisse einbeziehen"),
    ("sunrise", "Sonnenaufgang"),
    ("sunrise_title", "Titel der Kalendereinträge für Sonnenaufgang"),
    ("sunset", "Sonnenuntergang"),
    ("sunset_title", "Titel der Kalendereinträge für Sonnenuntergang"),
    ("download", "ICS herunterladen"),
    ("howto", "Anleitung"),
    ("howto_1", "Suche nach einem Ort oder gib Koordinaten manuell ein."),
    ("howto_2", "Wähle einen Datumsbereich und eine Ereignisdauer."),
    ("howto_3", "Wähle Sonnenaufgang, Sonnenuntergang oder beides."),
    (
        "howto_4",
        "Klicke auf „ICS herunterladen“ und importiere die Datei in deinen Kalender.",
    ),
    (
        "howto_disclaimer",
        "Zeiten werden lokal berechnet (kein API-Key). Die Ortssuche verwendet OpenStreetMap Nominatim.",
    ),
];

const EN: &[(&str, &str)] = &[
    ("title", "When is sunset again?"),
    (
        "intro",
        "Here you can generate your own sunrise and sunset calendar. Simply choose a location and a date range, then export the calendar. You can import the ICS file into any of your calendars.",
    ),
    (
        "intro_2",
        "Tip: Create a new, empty calendar and import the ICS file there. This way you can easily show or hide all sunrise and sunset events (and delete the entire calendar if something goes wrong :).",
    ),
    ("search_label", "Location search"),
    ("search_btn", "Search"),
    ("map_label", "Map (tap to set marker)"),
    (
        "map_hint",
        "Tip: Tap the map to set the location, or use the search results above.",
    ),
    ("lat", "Latitude"),
    ("lon", "Longitude"),
    ("start_date", "Start date"),
    ("end_date", "End date"),
    ("duration", "Event duration in calendar (minutes)"),
    ("include", "Include events"),
    ("sunrise", "Sunrise"),
    ("sunrise_title", "Calendar event title for sunrise"),
    ("sunset", "Sunset"),
    ("sunset_title", "Calendar event title for sunset"),
    ("download", "Download ICS"),
    ("howto", "How it works"),
    ("howto_1", "Search for a location or enter coordinates manually."),
    ("howto_2", "Select a date range and an event duration."),
    ("howto_3", "Choose sunrise, sunset, or both."),
    (
        "howto_4",
        "Click “Download ICS” and import the file into your calendar.",
    ),
    (
        "howto_disclaimer",
        "Times are calculated locally (No API-key). The location search is using OpenStreetMap Nominatim.",
    ),
];
