//! Terminal rendering for sunics-core types, colored with owo_colors.

use owo_colors::OwoColorize;
use sunics_core::i18n::LabelSheet;
use sunics_core::location::CoordinateFields;
use sunics_core::search::{ResultList, SearchResult};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SearchResult {
    fn render(&self) -> String {
        format!("{}\n      {}", self.title().bold(), self.meta().dimmed())
    }
}

impl Render for ResultList {
    fn render(&self) -> String {
        match self {
            ResultList::Cleared => String::new(),
            ResultList::NoResults => "   No results.".dimmed().to_string(),
            ResultList::Entries(results) => results
                .iter()
                .enumerate()
                .map(|(i, result)| format!("  {}. {}", i + 1, result.render()))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Both coordinate fields, labeled in the active language.
pub fn render_coordinates(labels: &LabelSheet, fields: &CoordinateFields) -> String {
    let lat_label = labels.text_for_key("lat").unwrap_or("lat");
    let lon_label = labels.text_for_key("lon").unwrap_or("lon");
    format!(
        "   {}: {}\n   {}: {}",
        lat_label.dimmed(),
        fields.latitude,
        lon_label.dimmed(),
        fields.longitude
    )
}
