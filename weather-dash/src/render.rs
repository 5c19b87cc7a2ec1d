use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Clear, Dataset, GraphType, List, ListItem, Paragraph, Tabs},
};
use weather_dash_core::{
    Metric, ViewState, WeatherPayload,
    format::{self, FORECAST_CARDS, WeatherIcon},
    messages,
};

/// Draw the whole dashboard from a state snapshot.
pub fn draw(f: &mut Frame, st: &ViewState) {
    let area = f.area();

    let title = match st.weather() {
        Some(w) => format::place_label(&w.location),
        None => st.committed_city().to_string(),
    };
    let outer = Block::bordered()
        .title(Line::from(vec![
            Span::styled(" weather-dash ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(title, Style::default().fg(Color::Cyan)),
        ]))
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(outer, area);

    let inner = area.inner(Margin { horizontal: 1, vertical: 1 });
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(inner);

    render_input(f, rows[0], st);
    render_error(f, rows[1], st);

    let cols = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);
    render_current(f, cols[0], st);

    let right = Layout::vertical([Constraint::Min(8), Constraint::Length(8)]).split(cols[1]);
    render_metric(f, right[0], st);
    render_forecast(f, right[1], st);

    render_footer(f, rows[3]);

    // Last, so it sits on top of the panels below the input.
    render_suggestions(f, rows[0], inner, st);
}

fn render_input(f: &mut Frame, area: Rect, st: &ViewState) {
    let block = Block::bordered().title(messages::YOUR_CITY);
    let text = if st.input_text().is_empty() {
        Line::from(Span::styled(messages::INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(st.input_text())
    };
    f.render_widget(Paragraph::new(text).block(block), area);

    let typed = u16::try_from(st.input_text().chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(typed).min(area.right().saturating_sub(2));
    f.set_cursor_position(Position::new(x, area.y + 1));
}

fn render_suggestions(f: &mut Frame, input: Rect, bounds: Rect, st: &ViewState) {
    let suggestions = st.suggestions();
    if suggestions.is_empty() {
        return;
    }

    let top = input.bottom();
    let wanted = u16::try_from(suggestions.len()).unwrap_or(u16::MAX).saturating_add(2);
    let height = wanted.min(bounds.bottom().saturating_sub(top));
    if height < 3 {
        return;
    }
    let area = Rect { x: input.x, y: top, width: input.width, height };

    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if st.highlighted() == Some(i) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(s.to_string()).style(style)
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        List::new(items).block(
            Block::bordered()
                .title("Suggestions")
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

fn render_error(f: &mut Frame, area: Rect, st: &ViewState) {
    if let Some(message) = st.error_message() {
        f.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::Red)),
            area,
        );
    }
}

fn render_current(f: &mut Frame, area: Rect, st: &ViewState) {
    let block = Block::bordered().title("Now");
    let mut lines = vec![Line::from(Span::styled(
        format::local_datetime_label(st.weather()),
        Style::default().fg(Color::Gray),
    ))];

    if let Some(w) = st.weather() {
        let current = &w.current;
        let icon = WeatherIcon::from_condition(&current.condition.text);
        lines.extend([
            Line::raw(""),
            Line::from(vec![
                Span::raw(icon.glyph()),
                Span::raw("  "),
                Span::styled(
                    format::temperature_label(current.temp_c),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::raw(current.condition.text.clone()),
            Line::raw(""),
            Line::raw(format!(
                "{}: {}",
                messages::HUMIDITY,
                format::humidity_label(f64::from(current.humidity))
            )),
            Line::raw(format!(
                "{}: {}",
                messages::WIND_SPEED,
                format::wind_label(current.wind_kph)
            )),
        ]);
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_metric(f: &mut Frame, area: Rect, st: &ViewState) {
    let metric = st.selected_metric();
    let block = Block::bordered().title(metric.label());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let tabs = Tabs::new(Metric::all().iter().map(|m| m.label()))
        .select(metric.index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" | ");
    f.render_widget(tabs, rows[0]);

    let headline = format::headline_value(st.weather(), metric);
    f.render_widget(
        Paragraph::new(headline).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[1],
    );

    if let Some(w) = st.weather() {
        render_chart(f, rows[2], w, metric);
    }
}

fn render_chart(f: &mut Frame, area: Rect, payload: &WeatherPayload, metric: Metric) {
    let series = format::chart_series(payload, metric);
    if series.is_empty() {
        return;
    }

    let points: Vec<(f64, f64)> =
        series.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let (lo, hi) = (min - 1.0, max + 1.0);
    let last = (points.len().max(2) - 1) as f64;

    let dataset = Dataset::default()
        .name(metric.label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .bounds([0.0, last])
                .labels(format::chart_labels(payload))
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels([format!("{lo:.1}"), format!("{hi:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .legend_position(None);

    f.render_widget(chart, area);
}

fn render_forecast(f: &mut Frame, area: Rect, st: &ViewState) {
    let block = Block::bordered().title("Forecast");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(w) = st.weather() else {
        return;
    };

    let slots = Layout::horizontal([Constraint::Ratio(1, FORECAST_CARDS as u32); FORECAST_CARDS])
        .split(inner);

    for (card, slot) in format::forecast_cards(w).into_iter().zip(slots.iter()) {
        let accent = if card.is_today { Color::Cyan } else { Color::DarkGray };
        let mut label = Style::default().fg(accent);
        if card.is_today {
            label = label.add_modifier(Modifier::BOLD);
        }

        let lines = vec![
            Line::styled(card.label, label),
            Line::raw(card.icon.glyph()),
            Line::styled(messages::HUMIDITY, Style::default().fg(Color::Gray)),
            Line::raw(card.humidity),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(accent))),
            *slot,
        );
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = Style::default().add_modifier(Modifier::BOLD);
    let spans = vec![
        Span::styled("Enter", key),
        Span::raw(" search  "),
        Span::styled("↑/↓", key),
        Span::raw(" suggestions  "),
        Span::styled("Tab", key),
        Span::raw(" metric  "),
        Span::styled("F5", key),
        Span::raw(" refresh  "),
        Span::styled("Esc", key),
        Span::raw(" quit"),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use weather_dash_core::{Action, Dashboard, Suggestion};

    fn payload(days: usize) -> WeatherPayload {
        let humidity = [78, 70, 85, 66, 60];
        let forecastday: Vec<_> = (0..days)
            .map(|i| {
                serde_json::json!({
                    "date": format!("2024-03-{:02}", 5 + i),
                    "day": {
                        "avgtemp_c": 5.0 + i as f64,
                        "avghumidity": humidity[i],
                        "uv": 2.0,
                        "condition": { "text": "Sunny" }
                    }
                })
            })
            .collect();

        serde_json::from_value(serde_json::json!({
            "location": {
                "name": "London",
                "country": "United Kingdom",
                "localtime": "2024-03-05 9:07"
            },
            "current": {
                "last_updated": "2024-03-05 09:00",
                "temp_c": 7.6, "humidity": 81, "wind_kph": 15.5,
                "condition": { "text": "Partly cloudy" }
            },
            "forecast": { "forecastday": forecastday }
        }))
        .unwrap()
    }

    fn loaded(days: usize) -> Dashboard {
        let mut dash = Dashboard::new("London");
        dash.update(Action::Mounted);
        dash.update(Action::WeatherLoaded { generation: 1, result: Ok(payload(days)) });
        dash
    }

    fn screen(st: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 34)).unwrap();
        terminal.draw(|f| draw(f, st)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    /// Text of the row right under the metric tabs, inside the panel border.
    fn headline_row(out: &str) -> String {
        let mut lines = out.lines();
        lines
            .by_ref()
            .find(|l| l.contains("Temperature | UV Index | Humidity"))
            .expect("metric tabs not drawn");
        let row = lines.next().expect("no row under the tabs");
        row.split('│')
            .map(str::trim)
            .rev()
            .find(|cell| !cell.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn no_payload_shows_loading_and_nothing_else() {
        let dash = Dashboard::new("London");
        let out = screen(dash.state());

        assert!(out.contains(messages::LOADING));
        assert!(!out.contains("Wind speed"));
        assert!(!out.contains("Suggestions"));
        assert!(!out.contains(messages::TODAY));
    }

    #[test]
    fn payload_renders_current_conditions_and_four_cards() {
        let dash = loaded(5);
        let out = screen(dash.state());

        assert!(out.contains("London, United Kingdom"));
        assert!(out.contains("9:07 AM, Tue, Mar 5, 2024"));
        assert!(out.contains("8°C"));
        assert!(out.contains("Humidity: 81%"));
        assert!(out.contains("Wind speed: 16 km/h"));
        assert!(out.contains(messages::TODAY));
        for shown in ["78%", "70%", "85%", "66%"] {
            assert!(out.contains(shown), "missing card {shown}");
        }
        assert!(!out.contains("60%"), "fifth day must not get a card");
    }

    #[test]
    fn short_forecast_renders_fewer_cards() {
        let dash = loaded(2);
        let out = screen(dash.state());

        assert!(out.contains("78%"));
        assert!(out.contains("70%"));
        assert!(!out.contains("85%"));
    }

    #[test]
    fn headline_tracks_selected_metric() {
        let mut dash = loaded(5);
        assert_eq!(headline_row(&screen(dash.state())), "5°C");

        dash.update(Action::MetricSelected(Metric::Humidity));
        assert_eq!(headline_row(&screen(dash.state())), "78%");

        dash.update(Action::MetricSelected(Metric::UvIndex));
        assert_eq!(headline_row(&screen(dash.state())), "2");
    }

    #[test]
    fn error_line_is_drawn() {
        let mut dash = Dashboard::new("London");
        dash.update(Action::InputChanged(String::new()));
        dash.update(Action::Submit);

        let out = screen(dash.state());
        assert!(out.contains(messages::EMPTY_CITY));
        assert!(out.contains(messages::INPUT_PLACEHOLDER));
    }

    #[test]
    fn overlay_lists_suggestions() {
        let mut dash = Dashboard::new("London");
        dash.update(Action::InputChanged("Pa".into()));
        dash.update(Action::SuggestionTimerFired { ticket: 1 });
        dash.update(Action::SuggestionsLoaded {
            generation: 1,
            result: Ok(vec![Suggestion {
                name: "Paris".into(),
                region: "Ile-de-France".into(),
                country: "France".into(),
            }]),
        });

        let out = screen(dash.state());
        assert!(out.contains("Suggestions"));
        assert!(out.contains("Paris, Ile-de-France, France"));
    }
}
