//! Core library for the `weather-dash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and the weatherapi.com client
//! - The dashboard's view state, the reducer that drives it, and the runtime
//!   that runs its network calls and debounce timer
//! - Pure formatters turning a forecast payload into display values
//!
//! It is used by `weather-dash`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod format;
pub mod messages;
pub mod model;
pub mod provider;
pub mod runtime;
pub mod state;

pub use config::Config;
pub use dashboard::{Action, Dashboard, Effect};
pub use error::FetchError;
pub use model::{Metric, Suggestion, WeatherPayload};
pub use provider::{WeatherProvider, provider_from_config};
pub use runtime::Runtime;
pub use state::ViewState;
