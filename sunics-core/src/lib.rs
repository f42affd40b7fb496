//! Core types and page logic for sunics.
//!
//! This crate holds everything the sunrise/sunset form does apart from drawing
//! pixels:
//! - `i18n`: the static label table and language switching
//! - `location`: the map widget seam and the location picker
//! - `search`: the place search client and its result list
//! - `form` and `generate`: validation, the request payload and the
//!   generation endpoint client
//! - `page`: the page controller that owns all of the above

pub mod config;
pub mod constants;
pub mod dialog;
pub mod download;
pub mod error;
pub mod form;
pub mod generate;
pub mod http;
pub mod i18n;
pub mod location;
pub mod page;
pub mod search;
pub mod ticket;

#[cfg(test)]
mod test_support;

pub use error::{SunicsError, SunicsResult};
pub use page::Page;
