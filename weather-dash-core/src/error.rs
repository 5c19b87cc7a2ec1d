use crate::messages;

/// Failure of a single request to the weather provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The provider answered with an `error.message` envelope,
    /// e.g. `No matching location found.`
    #[error("provider rejected the request: {message}")]
    Provider { code: Option<i64>, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider response contained no forecast days")]
    EmptyForecast,
}

impl FetchError {
    /// `true` for logical errors reported by the provider itself, as opposed to
    /// network or decoding failures.
    pub fn is_provider(&self) -> bool {
        matches!(self, FetchError::Provider { .. })
    }

    /// Fixed text shown to the user when a weather fetch fails.
    pub fn user_message(&self) -> &'static str {
        if self.is_provider() {
            messages::CITY_NOT_FOUND
        } else {
            messages::FETCH_FAILED
        }
    }
}
