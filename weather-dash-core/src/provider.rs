use crate::{
    Config, FetchError,
    model::{Suggestion, WeatherPayload},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Number of forecast days requested on every weather fetch.
pub const FORECAST_DAYS: u8 = 5;

/// Remote source of current conditions, forecasts and place-name suggestions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus a [`FORECAST_DAYS`]-day forecast for `city`.
    async fn forecast(&self, city: &str) -> Result<WeatherPayload, FetchError>;

    /// Place names matching a partial query, in provider relevance order.
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = WeatherApiProvider::with_base_url(api_key, config.base_url());

    Ok(Arc::new(provider))
}
