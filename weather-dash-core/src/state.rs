use crate::model::{Metric, Suggestion, WeatherPayload};

/// Maximum number of suggestions kept client-side.
pub const MAX_SUGGESTIONS: usize = 5;

/// Observable UI state of the dashboard.
///
/// Fields are private; readers use the getters and only the dashboard reducer
/// holds a `&mut` to call the mutators. Updates to different fields are not
/// transactional: an old payload may sit next to a new committed city until the
/// pending fetch resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    input_text: String,
    committed_city: String,
    weather: Option<WeatherPayload>,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    error_message: Option<String>,
    selected_metric: Metric,
}

impl ViewState {
    /// Fresh state seeded with an initial city in both the input box and the
    /// committed city.
    pub fn new(initial_city: &str) -> Self {
        let city = initial_city.trim().to_string();
        Self { input_text: city.clone(), committed_city: city, ..Self::default() }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn committed_city(&self) -> &str {
        &self.committed_city
    }

    pub fn weather(&self) -> Option<&WeatherPayload> {
        self.weather.as_ref()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn selected_metric(&self) -> Metric {
        self.selected_metric
    }

    /// Replace the input text. Any overlay highlight belonged to the old
    /// text, so it is dropped.
    pub(crate) fn set_input_text(&mut self, text: String) {
        self.input_text = text;
        self.highlighted = None;
    }

    /// Replace the committed city. Blank values are refused and `false` is
    /// returned; the previous city stays in place.
    pub(crate) fn set_committed_city(&mut self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() {
            return false;
        }
        self.committed_city = city.to_string();
        true
    }

    pub(crate) fn set_weather(&mut self, payload: WeatherPayload) {
        self.weather = Some(payload);
    }

    pub(crate) fn clear_weather(&mut self) {
        self.weather = None;
    }

    pub(crate) fn set_suggestions(&mut self, mut suggestions: Vec<Suggestion>) {
        suggestions.truncate(MAX_SUGGESTIONS);
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    pub(crate) fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
    }

    /// Move the overlay highlight down, starting at the first entry.
    pub(crate) fn highlight_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    /// Move the highlight up; moving past the first entry leaves the overlay.
    pub(crate) fn highlight_prev(&mut self) {
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub(crate) fn select_metric(&mut self, metric: Metric) {
        self.selected_metric = metric;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places(n: usize) -> Vec<Suggestion> {
        (0..n)
            .map(|i| Suggestion {
                name: format!("City {i}"),
                region: "Region".into(),
                country: "Country".into(),
            })
            .collect()
    }

    #[test]
    fn new_seeds_input_and_committed_city() {
        let state = ViewState::new("London");

        assert_eq!(state.input_text(), "London");
        assert_eq!(state.committed_city(), "London");
        assert!(state.weather().is_none());
        assert_eq!(state.selected_metric(), Metric::Temperature);
    }

    #[test]
    fn blank_commit_is_refused() {
        let mut state = ViewState::new("London");

        assert!(!state.set_committed_city("   "));
        assert_eq!(state.committed_city(), "London");

        assert!(state.set_committed_city("  Paris "));
        assert_eq!(state.committed_city(), "Paris");
    }

    #[test]
    fn suggestions_are_capped() {
        let mut state = ViewState::default();
        state.set_suggestions(places(8));

        assert_eq!(state.suggestions().len(), MAX_SUGGESTIONS);
        assert_eq!(state.suggestions()[4].name, "City 4");
    }

    #[test]
    fn highlight_stays_within_overlay() {
        let mut state = ViewState::default();
        state.highlight_next();
        assert_eq!(state.highlighted(), None);

        state.set_suggestions(places(2));
        state.highlight_next();
        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.highlighted(), Some(1));

        state.highlight_prev();
        state.highlight_prev();
        assert_eq!(state.highlighted(), None);

        state.highlight_next();
        state.clear_suggestions();
        assert_eq!(state.highlighted(), None);
    }
}
