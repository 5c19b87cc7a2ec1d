use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    FetchError,
    model::{Suggestion, WeatherPayload},
    provider::FORECAST_DAYS,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        Ok((status, body))
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    code: Option<i64>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaErrorBody,
}

/// Decode a response body, giving the provider's `error` envelope precedence
/// over the HTTP status: weatherapi.com pairs it with 400/401/403 responses.
fn decode<T>(status: StatusCode, body: &str) -> Result<T, FetchError>
where
    T: for<'de> Deserialize<'de>,
{
    if let Ok(envelope) = serde_json::from_str::<WaErrorEnvelope>(body) {
        return Err(FetchError::Provider {
            code: envelope.error.code,
            message: envelope.error.message,
        });
    }

    if !status.is_success() {
        return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(body) });
    }

    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, city: &str) -> Result<WeatherPayload, FetchError> {
        let days = FORECAST_DAYS.to_string();
        let (status, body) = self
            .get(
                "forecast.json",
                &[("q", city), ("days", days.as_str()), ("aqi", "no"), ("alerts", "yes")],
            )
            .await?;

        let payload: WeatherPayload = decode(status, &body)?;
        if payload.days().is_empty() {
            return Err(FetchError::EmptyForecast);
        }

        Ok(payload)
    }

    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let (status, body) = self.get("search.json", &[("q", query)]).await?;
        decode(status, &body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
