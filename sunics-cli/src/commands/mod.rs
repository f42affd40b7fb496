pub mod config;
pub mod generate;
pub mod health;
pub mod howto;
pub mod search;

use anyhow::Result;
use sunics_core::Page;
use sunics_core::config::Config;
use sunics_core::generate::GeneratorClient;
use sunics_core::http::build_client;
use sunics_core::i18n::LabelSheet;
use sunics_core::location::{CoordinateFields, HeadlessMap};
use sunics_core::search::SearchClient;

/// Days covered when no end date is given
pub const DEFAULT_RANGE_DAYS: u64 = 365;

/// The page as seen from a terminal: no map on screen, labels kept in memory.
pub type TerminalPage = Page<HeadlessMap, LabelSheet>;

pub fn new_page(config: &Config) -> TerminalPage {
    let mut page = Page::new(
        LabelSheet::with_all_labels(),
        config.language,
        CoordinateFields::default(),
    );
    page.init(Some(HeadlessMap::default()));
    page
}

pub fn search_client(config: &Config) -> Result<SearchClient> {
    Ok(SearchClient::new(
        build_client(config.timeout())?,
        config.search_url()?,
    ))
}

pub fn generator_client(config: &Config) -> Result<GeneratorClient> {
    Ok(GeneratorClient::new(
        build_client(config.timeout())?,
        config.server_url()?,
    ))
}
