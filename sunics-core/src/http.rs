//! Shared HTTP client construction.

use std::time::Duration;

use crate::error::SunicsResult;

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the client used for both the place search and the generation
/// endpoint. Nominatim rejects requests without an identifying user agent.
pub fn build_client(timeout: Duration) -> SunicsResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(format!("sunics/{}", CURRENT_VERSION))
        .timeout(timeout)
        .build()?)
}
