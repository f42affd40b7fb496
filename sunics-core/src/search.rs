//! Place search against a Nominatim-compatible geocoding API.

use reqwest::header::ACCEPT;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::constants::{RESULT_TITLE_MAX_CHARS, SEARCH_RESULT_LIMIT};
use crate::error::{SunicsError, SunicsResult};
use crate::location::Location;

/// One candidate returned by the search API.
///
/// Coordinates arrive as strings and are kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: String,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lon: String,
}

/// Accept coordinates as strings or bare numbers; anything else is kept as
/// its JSON text and simply fails to parse later.
fn lenient_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl SearchResult {
    pub fn name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unnamed result",
        }
    }

    /// Name as shown in the result list.
    pub fn title(&self) -> String {
        truncate_label(self.name(), RESULT_TITLE_MAX_CHARS)
    }

    pub fn meta(&self) -> String {
        format!("lat {} • lon {}", self.lat, self.lon)
    }

    /// `None` when the API sent something that is not a number.
    pub fn location(&self) -> Option<Location> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        Some(Location::new(latitude, longitude)).filter(|l| {
            l.latitude.is_finite() && l.longitude.is_finite()
        })
    }
}

/// Cut `text` to `max_chars` characters, ending in `…` when shortened.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultList {
    #[default]
    Cleared,
    NoResults,
    Entries(Vec<SearchResult>),
}

impl ResultList {
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            ResultList::NoResults
        } else {
            ResultList::Entries(results)
        }
    }

    pub fn entries(&self) -> &[SearchResult] {
        match self {
            ResultList::Entries(results) => results,
            _ => &[],
        }
    }
}

/// HTTP client for the place search API.
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", &SEARCH_RESULT_LIMIT.to_string())
            .append_pair("addressdetails", "1");
        url
    }

    /// GET the search endpoint. At most `SEARCH_RESULT_LIMIT` results are kept.
    pub async fn search(&self, query: &str) -> SunicsResult<Vec<SearchResult>> {
        info!(query, "searching places");

        let resp = self
            .http
            .get(self.search_url(query))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SunicsError::SearchStatus(resp.status().as_u16()));
        }

        let body = resp.bytes().await?;
        let mut results: Vec<SearchResult> = serde_json::from_slice(&body)
            .map_err(|e| SunicsError::Serialization(e.to_string()))?;
        results.truncate(SEARCH_RESULT_LIMIT);

        Ok(results)
    }
}
