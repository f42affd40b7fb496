//! The page controller.
//!
//! `Page` owns every piece of page-wide state: the active language, the
//! location picker with its map, the search results, the form and the help
//! dialog. Front ends feed it user events and read back what to show.
//!
//! Network requests are split in two halves. `begin_*` validates input and
//! hands out a pending request carrying a ticket; the caller performs the
//! request without borrowing the page; `complete_*` applies the response only
//! if no newer request of the same kind was started in the meantime.

use std::path::PathBuf;

use tracing::debug;

use crate::constants::{DEFAULT_LOCATION, DOWNLOAD_FILENAME, SELECTED_LABEL_MAX_CHARS};
use crate::dialog::{DialogEvent, HELP_KEYS, HelpDialog};
use crate::download::DownloadSink;
use crate::error::SunicsResult;
use crate::form::FormFields;
use crate::generate::{GenerationRequest, GeneratorClient};
use crate::i18n::{Language, TextRenderer, apply_language};
use crate::location::{CoordinateFields, Location, LocationPicker, LocationView};
use crate::search::{ResultList, SearchClient, SearchResult, truncate_label};
use crate::ticket::{RequestCounter, Ticket};

/// Where the last submission stands.
///
/// `Success` and `Failed` stick until the next submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// A search that has been started but not yet answered.
#[derive(Debug)]
pub struct PendingSearch {
    ticket: Ticket,
    pub query: String,
}

/// A validated submission waiting for the backend.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: Ticket,
    pub request: GenerationRequest,
}

pub struct Page<V, R> {
    language: Language,
    renderer: R,
    picker: LocationPicker<V>,
    results: ResultList,
    searches: RequestCounter,
    pub form: FormFields,
    submissions: RequestCounter,
    state: SubmissionState,
    dialog: HelpDialog,
    search_status: String,
    form_status: String,
    include_error: String,
}

impl<V: LocationView, R: TextRenderer> Page<V, R> {
    /// `coordinates` are whatever the fields held when the page loaded.
    pub fn new(renderer: R, language: Language, coordinates: CoordinateFields) -> Self {
        Page {
            language,
            renderer,
            picker: LocationPicker::new(coordinates),
            results: ResultList::Cleared,
            searches: RequestCounter::default(),
            form: FormFields::default(),
            submissions: RequestCounter::default(),
            state: SubmissionState::Idle,
            dialog: HelpDialog::default(),
            search_status: String::new(),
            form_status: String::new(),
            include_error: String::new(),
        }
    }

    /// Render the labels and attach the map widget, if there is one.
    pub fn init(&mut self, view: Option<V>) {
        self.apply_language(self.language);

        if self.picker.init(view).is_ok() {
            self.search_status = format!("Default location: {}", DEFAULT_LOCATION.label);
        }
    }

    // Language

    pub fn apply_language(&mut self, language: Language) {
        self.language = language;
        apply_language(language, &mut self.renderer);
    }

    pub fn toggle_language(&mut self) {
        self.apply_language(self.language.other());
    }

    // Location

    pub fn map_click(&mut self, at: Location) {
        self.search_status = self.picker.click(at);
    }

    pub fn edit_coordinates(&mut self, latitude: &str, longitude: &str) {
        self.picker.edit_fields(latitude, longitude);
    }

    // Search

    /// Start a search. Returns `None` for a blank query, which never reaches
    /// the network.
    pub fn begin_search(&mut self, query: &str) -> Option<PendingSearch> {
        // Even a blank query supersedes whatever is still in flight.
        let ticket = self.searches.issue();

        self.search_status.clear();
        self.form_status.clear();
        self.results = ResultList::Cleared;

        let query = query.trim();
        if query.is_empty() {
            self.search_status = "Enter a search query.".to_string();
            return None;
        }

        self.search_status = "Searching…".to_string();
        Some(PendingSearch {
            ticket,
            query: query.to_string(),
        })
    }

    /// Apply a search response. Returns false if it was superseded.
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        result: SunicsResult<Vec<SearchResult>>,
    ) -> bool {
        if !self.searches.is_current(pending.ticket) {
            debug!(query = %pending.query, "dropping superseded search response");
            return false;
        }

        match result {
            Ok(results) => {
                self.search_status = format!(
                    "Found {} result(s). Tap one to fill coordinates.",
                    results.len()
                );
                self.results = ResultList::from_results(results);
            }
            Err(e) => {
                self.search_status = format!("Search failed: {e}");
            }
        }

        true
    }

    pub async fn search(&mut self, client: &SearchClient, query: &str) {
        let Some(pending) = self.begin_search(query) else {
            return;
        };
        let result = client.search(&pending.query).await;
        self.complete_search(pending, result);
    }

    /// Pick the result at `index`. Results whose coordinates are not numbers
    /// are ignored.
    pub fn select_result(&mut self, index: usize) -> bool {
        let Some(result) = self.results.entries().get(index).cloned() else {
            return false;
        };
        let Some(location) = result.location() else {
            debug!(lat = %result.lat, lon = %result.lon, "ignoring result with malformed coordinates");
            return false;
        };

        self.picker.set_location(location, true);
        self.search_status = format!(
            "Selected: {}",
            truncate_label(result.name(), SELECTED_LABEL_MAX_CHARS)
        );
        self.results = ResultList::Cleared;
        true
    }

    // Form

    pub fn set_include_sunrise(&mut self, checked: bool) {
        self.form.include_sunrise = checked;
        self.refresh_include_error();
    }

    pub fn set_include_sunset(&mut self, checked: bool) {
        self.form.include_sunset = checked;
        self.refresh_include_error();
    }

    fn refresh_include_error(&mut self) {
        self.include_error = match self.form.check_included() {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        };
    }

    /// Validate the form. On success the returned submission still has to be
    /// sent and passed to [`Page::complete_submit`].
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        self.state = SubmissionState::Validating;
        self.form_status.clear();
        self.include_error.clear();

        match self.form.validate(self.picker.fields()) {
            Ok(request) => {
                self.form_status = "Generating…".to_string();
                self.state = SubmissionState::Submitting;
                Some(PendingSubmission {
                    ticket: self.submissions.issue(),
                    request,
                })
            }
            Err(e) => {
                if e.is_inline() {
                    self.include_error = e.to_string();
                } else {
                    self.form_status = e.to_string();
                }
                self.state = SubmissionState::Idle;
                None
            }
        }
    }

    /// Save the generated file or report the failure. Returns the saved path,
    /// or `None` on failure or when the submission was superseded.
    pub fn complete_submit<S: DownloadSink + ?Sized>(
        &mut self,
        pending: PendingSubmission,
        result: SunicsResult<Vec<u8>>,
        sink: &mut S,
    ) -> Option<PathBuf> {
        if !self.submissions.is_current(pending.ticket) {
            debug!("dropping superseded generation response");
            return None;
        }

        match result.and_then(|bytes| sink.save(DOWNLOAD_FILENAME, &bytes)) {
            Ok(path) => {
                self.form_status = "Downloaded.".to_string();
                self.state = SubmissionState::Success;
                Some(path)
            }
            Err(e) => {
                self.form_status = format!("Failed: {e}");
                self.state = SubmissionState::Failed;
                None
            }
        }
    }

    pub async fn submit<S: DownloadSink + ?Sized>(
        &mut self,
        client: &GeneratorClient,
        sink: &mut S,
    ) -> Option<PathBuf> {
        let pending = self.begin_submit()?;
        let result = client.generate(&pending.request).await;
        self.complete_submit(pending, result, sink)
    }

    // Help dialog

    pub fn dialog_event(&mut self, event: DialogEvent<'_>) -> bool {
        self.dialog.handle(event)
    }

    /// Dialog heading followed by its paragraphs, in the active language.
    pub fn help_text(&self) -> Vec<&'static str> {
        std::iter::once("howto")
            .chain(HELP_KEYS.iter().copied())
            .filter_map(|key| self.language.translate(key))
            .collect()
    }

    // Accessors

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn picker(&self) -> &LocationPicker<V> {
        &self.picker
    }

    pub fn coordinates(&self) -> &CoordinateFields {
        self.picker.fields()
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_dialog_shown(&self) -> bool {
        self.dialog.is_shown()
    }

    pub fn search_status(&self) -> &str {
        &self.search_status
    }

    pub fn form_status(&self) -> &str {
        &self.form_status
    }

    pub fn include_error(&self) -> &str {
        &self.include_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SunicsError;
    use crate::i18n::LabelSheet;
    use crate::location::HeadlessMap;
    use crate::test_support::{self, MemorySink};
    use axum::{Json, Router, http::StatusCode, routing::{get, post}};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use url::Url;

    type TestPage = Page<HeadlessMap, LabelSheet>;

    fn page() -> TestPage {
        let mut page = Page::new(
            LabelSheet::with_all_labels(),
            Language::De,
            CoordinateFields::default(),
        );
        page.init(Some(HeadlessMap::default()));
        page
    }

    fn fill_example_form(page: &mut TestPage) {
        page.edit_coordinates("46.95", "7.46");
        page.form.start_date = "2024-06-01".into();
        page.form.end_date = "2024-06-03".into();
        page.form.duration = "30".into();
        page.set_include_sunrise(true);
        page.set_include_sunset(false);
    }

    fn bern() -> SearchResult {
        SearchResult {
            display_name: Some("Bern, Switzerland".into()),
            lat: "46.9480".into(),
            lon: "7.4474".into(),
        }
    }

    async fn search_client(router: Router) -> SearchClient {
        let base = test_support::serve(router).await;
        SearchClient::new(
            reqwest::Client::new(),
            Url::parse(&format!("{}/search", base)).unwrap(),
        )
    }

    async fn generator(router: Router) -> GeneratorClient {
        let base = test_support::serve(router).await;
        GeneratorClient::new(reqwest::Client::new(), Url::parse(&base).unwrap())
    }

    #[test]
    fn init_renders_german_and_default_location() {
        let page = page();

        assert_eq!(page.renderer().text("title"), Some("Wann ist nochmal Sonnenuntergang?"));
        assert_eq!(page.renderer().toggle_label(), "EN");
        assert_eq!(page.search_status(), "Default location: Rosengarten, Bern, Schweiz");
        assert_eq!(page.coordinates().latitude, "46.951900");
    }

    #[test]
    fn init_without_map_keeps_form_usable() {
        let mut page: TestPage = Page::new(
            LabelSheet::with_all_labels(),
            Language::En,
            CoordinateFields::default(),
        );
        page.init(None);

        assert_eq!(page.search_status(), "");
        assert!(!page.picker().has_map());
        assert_eq!(page.renderer().text("title"), Some("When is sunset again?"));

        fill_example_form(&mut page);
        assert!(page.begin_submit().is_some());
    }

    #[test]
    fn toggle_switches_labels_back_and_forth() {
        let mut page = page();

        page.toggle_language();
        assert_eq!(page.language(), Language::En);
        assert_eq!(page.renderer().text("download"), Some("Download ICS"));
        assert_eq!(page.renderer().toggle_label(), "DE");
        assert_eq!(page.renderer().document_language(), "en");

        page.toggle_language();
        assert_eq!(page.renderer().text("download"), Some("ICS herunterladen"));
    }

    #[test]
    fn map_click_updates_status() {
        let mut page = page();

        page.map_click(Location::new(47.0, 8.0));

        assert_eq!(page.search_status(), "Selected on map: lat 47.000000 • lon 8.000000");
        assert_eq!(page.coordinates().longitude, "8.000000");
    }

    #[test]
    fn blank_query_never_searches() {
        let mut page = page();

        assert!(page.begin_search("   ").is_none());
        assert_eq!(page.search_status(), "Enter a search query.");
        assert_eq!(page.results(), &ResultList::Cleared);
    }

    #[tokio::test]
    async fn blank_query_through_client_sends_nothing() {
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/search",
            get(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Json(json!([]))
                }
            }),
        );
        let client = search_client(router).await;
        let mut page = page();

        page.search(&client, "\t ").await;

        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(page.search_status(), "Enter a search query.");
    }

    #[tokio::test]
    async fn search_and_select_bern() {
        let router = Router::new().route(
            "/search",
            get(|| async {
                Json(json!([
                    {"display_name": "Bern, Switzerland", "lat": "46.9480", "lon": "7.4474"}
                ]))
            }),
        );
        let client = search_client(router).await;
        let mut page = page();

        page.search(&client, "Bern").await;
        assert_eq!(
            page.search_status(),
            "Found 1 result(s). Tap one to fill coordinates."
        );
        assert_eq!(page.results().entries(), &[bern()]);

        assert!(page.select_result(0));

        assert_eq!(page.coordinates().latitude, "46.948000");
        assert_eq!(page.coordinates().longitude, "7.447400");
        assert_eq!(page.results(), &ResultList::Cleared);
        assert_eq!(page.search_status(), "Selected: Bern, Switzerland");

        let map = page.picker().view().unwrap();
        assert_eq!(map.marker, Some(Location::new(46.948, 7.4474)));
        assert_eq!(map.center, Some(Location::new(46.948, 7.4474)));
    }

    #[tokio::test]
    async fn search_failure_is_reported() {
        let router = Router::new().route(
            "/search",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let client = search_client(router).await;
        let mut page = page();

        page.search(&client, "Bern").await;

        assert_eq!(page.search_status(), "Search failed: Nominatim error: HTTP 503");
        assert_eq!(page.results(), &ResultList::Cleared);
    }

    #[test]
    fn empty_response_shows_no_results() {
        let mut page = page();
        let pending = page.begin_search("Atlantis").unwrap();

        page.complete_search(pending, Ok(vec![]));

        assert_eq!(page.results(), &ResultList::NoResults);
        assert_eq!(
            page.search_status(),
            "Found 0 result(s). Tap one to fill coordinates."
        );
    }

    #[test]
    fn superseded_search_is_dropped() {
        let mut page = page();
        let slow = page.begin_search("Bern").unwrap();
        let fast = page.begin_search("Zürich").unwrap();

        let zurich = SearchResult {
            display_name: Some("Zürich, Schweiz".into()),
            lat: "47.3769".into(),
            lon: "8.5417".into(),
        };
        assert!(page.complete_search(fast, Ok(vec![zurich.clone()])));
        assert!(!page.complete_search(slow, Ok(vec![bern()])));

        assert_eq!(page.results().entries(), &[zurich]);
    }

    #[test]
    fn blank_query_supersedes_pending_search() {
        let mut page = page();
        let pending = page.begin_search("Bern").unwrap();
        assert!(page.begin_search("").is_none());

        assert!(!page.complete_search(pending, Ok(vec![bern()])));
        assert_eq!(page.search_status(), "Enter a search query.");
    }

    #[test]
    fn long_names_are_shortened_in_status() {
        let mut page = page();
        let pending = page.begin_search("long").unwrap();
        let long = SearchResult {
            display_name: Some("x".repeat(200)),
            lat: "1".into(),
            lon: "2".into(),
        };
        page.complete_search(pending, Ok(vec![long]));

        page.select_result(0);

        let expected = format!("Selected: {}…", "x".repeat(89));
        assert_eq!(page.search_status(), expected);
    }

    #[test]
    fn malformed_result_is_ignored() {
        let mut page = page();
        let pending = page.begin_search("Nowhere").unwrap();
        let broken = SearchResult {
            display_name: Some("Nowhere".into()),
            lat: "".into(),
            lon: "abc".into(),
        };
        page.complete_search(pending, Ok(vec![broken]));

        assert!(!page.select_result(0));
        assert!(!page.select_result(5));
        assert_eq!(page.coordinates().latitude, "46.951900");
        assert_eq!(page.results().entries().len(), 1);
    }

    #[test]
    fn checkbox_changes_revalidate_inclusion() {
        let mut page = page();

        page.set_include_sunrise(false);
        assert_eq!(page.include_error(), "");

        page.set_include_sunset(false);
        assert_eq!(page.include_error(), "Select at least one: sunrise and/or sunset.");

        page.set_include_sunset(true);
        assert_eq!(page.include_error(), "");
    }

    #[test]
    fn nothing_included_blocks_submission() {
        let mut page = page();
        fill_example_form(&mut page);
        page.set_include_sunrise(false);

        assert!(page.begin_submit().is_none());
        assert_eq!(page.include_error(), "Select at least one: sunrise and/or sunset.");
        assert_eq!(page.form_status(), "");
        assert_eq!(page.state(), SubmissionState::Idle);
    }

    #[test]
    fn missing_dates_block_submission() {
        let mut page = page();

        assert!(page.begin_submit().is_none());
        assert_eq!(
            page.form_status(),
            "Please fill latitude, longitude, start date, and end date."
        );
    }

    #[test]
    fn reversed_dates_block_submission() {
        let mut page = page();
        fill_example_form(&mut page);
        page.form.start_date = "2024-06-05".into();

        assert!(page.begin_submit().is_none());
        assert_eq!(page.form_status(), "End date must be on or after start date.");
    }

    #[tokio::test]
    async fn submit_downloads_calendar() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/generate",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
                }
            }),
        );
        let client = generator(router).await;
        let mut page = page();
        fill_example_form(&mut page);
        let mut sink = MemorySink::default();

        let saved = page.submit(&client, &mut sink).await;

        assert_eq!(saved, Some(PathBuf::from("sun-events.ics")));
        assert_eq!(page.form_status(), "Downloaded.");
        assert_eq!(page.state(), SubmissionState::Success);
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].0, "sun-events.ics");
        assert_eq!(sink.saved[0].1, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["sunrise_title"], "Sunrise");
        assert_eq!(body["sunset_title"], "Sunset");
        assert_eq!(body["lat"], 46.95);
        assert_eq!(body["start_date"], "2024-06-01");
        assert_eq!(body["duration"], 30);
        assert_eq!(body["include_sunset"], false);
    }

    #[tokio::test]
    async fn backend_error_is_shown() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal error") }),
        );
        let client = generator(router).await;
        let mut page = page();
        fill_example_form(&mut page);
        let mut sink = MemorySink::default();

        let saved = page.submit(&client, &mut sink).await;

        assert_eq!(saved, None);
        assert_eq!(page.form_status(), "Failed: internal error");
        assert_eq!(page.state(), SubmissionState::Failed);
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn superseded_submission_is_dropped() {
        let mut page = page();
        fill_example_form(&mut page);
        let mut sink = MemorySink::default();

        let first = page.begin_submit().unwrap();
        let second = page.begin_submit().unwrap();

        assert!(page.complete_submit(second, Ok(b"new".to_vec()), &mut sink).is_some());
        assert!(page.complete_submit(first, Err(SunicsError::Generation("late".into())), &mut sink).is_none());

        assert_eq!(page.form_status(), "Downloaded.");
        assert_eq!(sink.saved.len(), 1);
    }

    #[test]
    fn resubmitting_resets_previous_outcome() {
        let mut page = page();
        fill_example_form(&mut page);
        let mut sink = MemorySink::default();

        let pending = page.begin_submit().unwrap();
        page.complete_submit(pending, Err(SunicsError::Generation("HTTP 500".into())), &mut sink);
        assert_eq!(page.form_status(), "Failed: HTTP 500");

        let pending = page.begin_submit().unwrap();
        assert_eq!(page.form_status(), "Generating…");
        assert_eq!(page.state(), SubmissionState::Submitting);
        page.complete_submit(pending, Ok(b"ok".to_vec()), &mut sink);
        assert_eq!(page.state(), SubmissionState::Success);
    }

    #[test]
    fn help_dialog_follows_language() {
        let mut page = page();

        assert!(page.dialog_event(DialogEvent::TriggerClick));
        assert_eq!(page.help_text()[0], "Anleitung");

        page.toggle_language();
        assert_eq!(page.help_text()[0], "How it works");
        assert_eq!(page.help_text().len(), 6);

        assert!(!page.dialog_event(DialogEvent::KeyDown("Escape")));
        assert!(!page.is_dialog_shown());
    }
}
