use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};
use weather_dash_core::{Action, Runtime, WeatherProvider};

use crate::{
    keys::{self, KeyOutcome},
    render,
};

const INPUT_POLL: Duration = Duration::from_millis(33);

/// Run the interactive dashboard until the user quits.
pub fn run(provider: Arc<dyn WeatherProvider>, city: &str) -> Result<()> {
    let mut runtime = Runtime::new(provider, city);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut runtime);
    restore_terminal(&mut terminal)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runtime: &mut Runtime,
) -> Result<()> {
    runtime.dispatch(Action::Mounted);

    loop {
        // Fold in whatever the network and the debounce timer produced.
        runtime.drain();

        terminal.draw(|f| render::draw(f, runtime.state()))?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match keys::map_key(key, runtime.state()) {
                KeyOutcome::Quit => break,
                KeyOutcome::Dispatch(action) => runtime.dispatch(action),
                KeyOutcome::Ignore => {}
            }
        }
    }

    tracing::info!("dashboard closed");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(term: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    term.show_cursor()?;
    Ok(())
}
