//! Client for the calendar generation endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::error::{SunicsError, SunicsResult};

/// JSON body of `POST /generate`. Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: u32,
    pub include_sunrise: bool,
    pub include_sunset: bool,
    pub sunrise_title: String,
    pub sunset_title: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP client for the generation backend
pub struct GeneratorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GeneratorClient {
    pub fn new(http: reqwest::Client, mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn endpoint(&self, path: &str) -> SunicsResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// POST /generate
    ///
    /// Returns the calendar file bytes. A non-2xx answer becomes
    /// [`SunicsError::Generation`] carrying the response text.
    pub async fn generate(&self, request: &GenerationRequest) -> SunicsResult<Vec<u8>> {
        let url = self.endpoint("generate")?;
        info!(url = url.as_str(), start = %request.start_date, end = %request.end_date, "requesting calendar");

        let resp = self.http.post(url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text
            };
            return Err(SunicsError::Generation(message));
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// GET /health
    pub async fn health(&self) -> SunicsResult<()> {
        let resp = self.http.get(self.endpoint("health")?).send().await?;

        if !resp.status().is_success() {
            return Err(SunicsError::Generation(format!(
                "HTTP {}",
                resp.status().as_u16()
            )));
        }

        let body = resp.bytes().await?;
        let health: HealthResponse = serde_json::from_slice(&body)
            .map_err(|e| SunicsError::Serialization(e.to_string()))?;

        if health.status != "ok" {
            return Err(SunicsError::Generation(format!(
                "Backend reports status '{}'",
                health.status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::{Json, Router, http::StatusCode, routing::{get, post}};
    use serde_json::{Value, json};

    fn request() -> GenerationRequest {
        GenerationRequest {
            lat: 46.95,
            lon: 7.46,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            duration: 30,
            include_sunrise: true,
            include_sunset: false,
            sunrise_title: "Sunrise".into(),
            sunset_title: "Sunset".into(),
        }
    }

    async fn client_for(router: Router) -> GeneratorClient {
        let base = test_support::serve(router).await;
        GeneratorClient::new(reqwest::Client::new(), Url::parse(&base).unwrap())
    }

    #[test]
    fn request_serializes_to_wire_format() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "lat": 46.95,
                "lon": 7.46,
                "start_date": "2024-06-01",
                "end_date": "2024-06-03",
                "duration": 30,
                "include_sunrise": true,
                "include_sunset": false,
                "sunrise_title": "Sunrise",
                "sunset_title": "Sunset"
            })
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = GeneratorClient::new(
            reqwest::Client::new(),
            Url::parse("https://example.com/sun").unwrap(),
        );
        assert_eq!(
            client.endpoint("generate").unwrap().as_str(),
            "https://example.com/sun/generate"
        );
    }

    #[tokio::test]
    async fn generate_returns_body() {
        let router = Router::new().route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                if body["sunrise_title"] == "Sunrise" {
                    (StatusCode::OK, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n")
                } else {
                    (StatusCode::BAD_REQUEST, "bad title")
                }
            }),
        );
        let client = client_for(router).await;

        let bytes = client.generate(&request()).await.unwrap();

        assert_eq!(bytes, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }

    #[tokio::test]
    async fn generate_uses_error_body_as_message() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal error") }),
        );
        let client = client_for(router).await;

        let err = client.generate(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "internal error");
    }

    #[tokio::test]
    async fn generate_falls_back_to_status_code() {
        let router = Router::new().route("/generate", post(|| async { StatusCode::BAD_GATEWAY }));
        let client = client_for(router).await;

        let err = client.generate(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn health_accepts_ok() {
        let router = Router::new().route("/health", get(|| async { Json(json!({"status": "ok"})) }));
        let client = client_for(router).await;

        client.health().await.unwrap();
    }
}
