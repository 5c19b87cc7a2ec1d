use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use weather_dash_core::{Action, ViewState};

#[derive(Debug)]
pub enum KeyOutcome {
    Quit,
    Dispatch(Action),
    Ignore,
}

/// Translate a key press into a dashboard action. Text edits produce the full
/// new input value, the way a text field reports changes.
pub fn map_key(key: KeyEvent, state: &ViewState) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char('c') if ctrl => KeyOutcome::Quit,
        KeyCode::Char('u') if ctrl => {
            if state.input_text().is_empty() {
                KeyOutcome::Ignore
            } else {
                KeyOutcome::Dispatch(Action::InputChanged(String::new()))
            }
        }
        KeyCode::Char(_) if ctrl => KeyOutcome::Ignore,
        KeyCode::Char(c) => {
            let mut text = state.input_text().to_string();
            text.push(c);
            KeyOutcome::Dispatch(Action::InputChanged(text))
        }
        KeyCode::Backspace => {
            let mut text = state.input_text().to_string();
            match text.pop() {
                Some(_) => KeyOutcome::Dispatch(Action::InputChanged(text)),
                None => KeyOutcome::Ignore,
            }
        }
        KeyCode::Enter => match state.highlighted() {
            Some(index) => KeyOutcome::Dispatch(Action::SuggestionClicked(index)),
            None => KeyOutcome::Dispatch(Action::Submit),
        },
        KeyCode::Down => KeyOutcome::Dispatch(Action::HighlightNext),
        KeyCode::Up => KeyOutcome::Dispatch(Action::HighlightPrev),
        KeyCode::Tab => KeyOutcome::Dispatch(Action::NextMetric),
        KeyCode::BackTab => KeyOutcome::Dispatch(Action::PrevMetric),
        KeyCode::F(5) => KeyOutcome::Dispatch(Action::Refresh),
        _ => KeyOutcome::Ignore,
    }
}
