use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    WeatherProvider,
    dashboard::{Action, Dashboard, Effect},
    debounce::{Debouncer, SUGGESTION_DEBOUNCE},
    state::ViewState,
};

/// Owns the [`Dashboard`] and executes the effects it asks for.
///
/// Network calls and the debounce timer run as tokio tasks that report back by
/// sending an [`Action`] on an internal channel. The UI thread calls
/// [`Runtime::drain`] (or awaits [`Runtime::step`]) to fold those results into
/// the view state, so all mutation happens on one task.
#[derive(Debug)]
pub struct Runtime {
    dashboard: Dashboard,
    provider: Arc<dyn WeatherProvider>,
    debouncer: Debouncer,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl Runtime {
    pub fn new(provider: Arc<dyn WeatherProvider>, initial_city: &str) -> Self {
        Self::with_debounce(provider, initial_city, SUGGESTION_DEBOUNCE)
    }

    pub fn with_debounce(
        provider: Arc<dyn WeatherProvider>,
        initial_city: &str,
        debounce: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dashboard: Dashboard::new(initial_city),
            provider,
            debouncer: Debouncer::new(debounce),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.dashboard.state()
    }

    /// Apply one action and start whatever it triggers.
    pub fn dispatch(&mut self, action: Action) {
        for effect in self.dashboard.update(action) {
            self.run(effect);
        }
    }

    /// Apply every result that has arrived so far without waiting.
    /// Returns the number of actions applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Wait for the next background result and apply it.
    pub async fn step(&mut self) {
        // `self.tx` keeps the channel open, so `recv` only yields `Some`.
        if let Some(action) = self.rx.recv().await {
            self.dispatch(action);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather { city, generation } => {
                tracing::debug!(%city, generation, "fetching forecast");
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.forecast(&city).await;
                    let _ = tx.send(Action::WeatherLoaded { generation, result });
                });
            }
            Effect::StartSuggestionTimer { ticket } => {
                self.debouncer.schedule(&self.tx, Action::SuggestionTimerFired { ticket });
            }
            Effect::CancelSuggestionTimer => self.debouncer.cancel(),
            Effect::FetchSuggestions { query, generation } => {
                tracing::debug!(%query, generation, "fetching suggestions");
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.search(&query).await;
                    let _ = tx.send(Action::SuggestionsLoaded { generation, result });
                });
            }
        }
    }
}
