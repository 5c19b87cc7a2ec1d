//! Event handling for the dashboard.
//!
//! [`Dashboard::update`] is the only place the [`ViewState`] is mutated. It is
//! synchronous and never performs I/O; anything asynchronous is returned as an
//! [`Effect`] for the runtime to execute, and its outcome comes back later as
//! another [`Action`].

use crate::{
    FetchError, messages,
    model::{Metric, Suggestion, WeatherPayload},
    state::ViewState,
};

/// Everything that can happen to the dashboard.
#[derive(Debug)]
pub enum Action {
    /// The dashboard became visible; fetch the seed city.
    Mounted,
    /// The input box now holds this text.
    InputChanged(String),
    /// Enter pressed in the input box.
    Submit,
    /// A suggestion from the overlay was picked.
    SuggestionClicked(usize),
    MetricSelected(Metric),
    NextMetric,
    PrevMetric,
    HighlightNext,
    HighlightPrev,
    /// Fetch the committed city again.
    Refresh,
    SuggestionTimerFired { ticket: u64 },
    SuggestionsLoaded { generation: u64, result: Result<Vec<Suggestion>, FetchError> },
    WeatherLoaded { generation: u64, result: Result<WeatherPayload, FetchError> },
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchWeather { city: String, generation: u64 },
    /// Start the debounce timer, replacing any pending one.
    StartSuggestionTimer { ticket: u64 },
    CancelSuggestionTimer,
    FetchSuggestions { query: String, generation: u64 },
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    state: ViewState,
    weather_generation: u64,
    suggestion_generation: u64,
    timer_ticket: u64,
}

impl Dashboard {
    pub fn new(initial_city: &str) -> Self {
        Self {
            state: ViewState::new(initial_city),
            weather_generation: 0,
            suggestion_generation: 0,
            timer_ticket: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Mounted | Action::Refresh => self.fetch_weather(),
            Action::InputChanged(text) => self.input_changed(text),
            Action::Submit => {
                let text = self.state.input_text().to_string();
                self.commit(&text)
            }
            Action::SuggestionClicked(index) => self.suggestion_clicked(index),
            Action::MetricSelected(metric) => {
                self.state.select_metric(metric);
                Vec::new()
            }
            Action::NextMetric => {
                self.state.select_metric(self.state.selected_metric().next());
                Vec::new()
            }
            Action::PrevMetric => {
                self.state.select_metric(self.state.selected_metric().prev());
                Vec::new()
            }
            Action::HighlightNext => {
                self.state.highlight_next();
                Vec::new()
            }
            Action::HighlightPrev => {
                self.state.highlight_prev();
                Vec::new()
            }
            Action::SuggestionTimerFired { ticket } => self.timer_fired(ticket),
            Action::SuggestionsLoaded { generation, result } => {
                self.suggestions_loaded(generation, result);
                Vec::new()
            }
            Action::WeatherLoaded { generation, result } => {
                self.weather_loaded(generation, result);
                Vec::new()
            }
        }
    }

    fn fetch_weather(&mut self) -> Vec<Effect> {
        let city = self.state.committed_city();
        if city.is_empty() {
            return Vec::new();
        }

        self.weather_generation += 1;
        vec![Effect::FetchWeather { city: city.to_string(), generation: self.weather_generation }]
    }

    fn input_changed(&mut self, text: String) -> Vec<Effect> {
        self.state.set_input_text(text);
        self.state.clear_error();

        if self.state.input_text().trim().is_empty() {
            self.state.clear_suggestions();
            return self.cancel_suggestion_lookup();
        }

        self.timer_ticket += 1;
        vec![Effect::StartSuggestionTimer { ticket: self.timer_ticket }]
    }

    /// Invalidate the pending timer and any suggestion request in flight.
    fn cancel_suggestion_lookup(&mut self) -> Vec<Effect> {
        self.timer_ticket += 1;
        self.suggestion_generation += 1;
        vec![Effect::CancelSuggestionTimer]
    }

    fn commit(&mut self, city: &str) -> Vec<Effect> {
        let previous = self.state.committed_city().to_string();
        if !self.state.set_committed_city(city) {
            self.state.set_error(messages::EMPTY_CITY);
            return Vec::new();
        }

        self.state.clear_suggestions();
        let mut effects = self.cancel_suggestion_lookup();

        if self.state.committed_city() != previous {
            effects.extend(self.fetch_weather());
        }
        effects
    }

    fn suggestion_clicked(&mut self, index: usize) -> Vec<Effect> {
        let Some(picked) = self.state.suggestions().get(index).cloned() else {
            return Vec::new();
        };

        self.state.set_input_text(picked.name.clone());
        self.state.clear_error();
        self.commit(&picked.name)
    }

    fn timer_fired(&mut self, ticket: u64) -> Vec<Effect> {
        if ticket != self.timer_ticket {
            tracing::debug!(
                ticket,
                current = self.timer_ticket,
                "ignoring superseded suggestion timer"
            );
            return Vec::new();
        }

        let query = self.state.input_text();
        if query.trim().is_empty() {
            self.state.clear_suggestions();
            return Vec::new();
        }

        self.suggestion_generation += 1;
        vec![Effect::FetchSuggestions {
            query: query.to_string(),
            generation: self.suggestion_generation,
        }]
    }

    fn suggestions_loaded(&mut self, generation: u64, result: Result<Vec<Suggestion>, FetchError>) {
        if generation != self.suggestion_generation {
            tracing::debug!(generation, "dropping stale suggestions");
            return;
        }

        match result {
            Ok(found) => self.state.set_suggestions(found),
            Err(e) => {
                tracing::warn!(error = %e, "suggestion lookup failed");
                self.state.clear_suggestions();
            }
        }
    }

    fn weather_loaded(&mut self, generation: u64, result: Result<WeatherPayload, FetchError>) {
        if generation != self.weather_generation {
            tracing::debug!(
                generation,
                current = self.weather_generation,
                "dropping stale forecast"
            );
            return;
        }

        match result {
            Ok(payload) => {
                tracing::info!(city = %self.state.committed_city(), "forecast updated");
                self.state.set_weather(payload);
                self.state.clear_error();
            }
            Err(e) => {
                tracing::warn!(
                    city = %self.state.committed_city(),
                    error = %e,
                    "forecast fetch failed"
                );
                self.state.clear_weather();
                self.state.set_error(e.user_message());
            }
        }
    }
}
