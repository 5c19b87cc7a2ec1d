use std::fmt::Write;
use weather_dash_core::{
    Metric, WeatherPayload,
    format::{self, WeatherIcon},
    messages,
};

/// Plain-text rendition of the dashboard for `weather-dash show`.
pub fn render(payload: &WeatherPayload, metric: Metric) -> String {
    let mut out = String::new();
    let current = &payload.current;
    let icon = WeatherIcon::from_condition(&current.condition.text);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", format::place_label(&payload.location));
    let _ = writeln!(out, "{}", format::local_datetime_label(Some(payload)));
    let _ = writeln!(
        out,
        "{} {}  {}",
        icon.glyph(),
        format::temperature_label(current.temp_c),
        current.condition.text
    );
    let _ = writeln!(
        out,
        "{}: {}   {}: {}",
        messages::HUMIDITY,
        format::humidity_label(f64::from(current.humidity)),
        messages::WIND_SPEED,
        format::wind_label(current.wind_kph)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}: {}", metric.label(), format::headline_value(Some(payload), metric));
    let labels = format::chart_labels(payload);
    for (label, value) in labels.iter().zip(format::chart_series(payload, metric)) {
        let _ = writeln!(out, "  {label:<8}{value}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Forecast");
    for card in format::forecast_cards(payload) {
        let _ = writeln!(
            out,
            "  {:<8}{}  {} {}",
            card.label,
            card.icon.glyph(),
            messages::HUMIDITY,
            card.humidity
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> WeatherPayload {
        serde_json::from_value(serde_json::json!({
            "location": { "name": "Hanoi", "country": "Vietnam", "localtime": "2024-06-01 18:30" },
            "current": {
                "last_updated": "2024-06-01 18:15",
                "temp_c": 31.4, "humidity": 74, "wind_kph": 9.4,
                "condition": { "text": "Light rain" }
            },
            "forecast": { "forecastday": [
                { "date": "2024-06-01", "day": { "avgtemp_c": 30.5, "avghumidity": 75, "uv": 8.0, "condition": { "text": "Moderate rain" } } },
                { "date": "2024-06-02", "day": { "avgtemp_c": 29.1, "avghumidity": 80, "uv": 6.5, "condition": { "text": "Sunny" } } },
                { "date": "2024-06-03", "day": { "avgtemp_c": 28.7, "avghumidity": 82, "uv": 7.0, "condition": { "text": "Cloudy" } } },
                { "date": "2024-06-04", "day": { "avgtemp_c": 31.0, "avghumidity": 70, "uv": 9.0, "condition": { "text": "Clear" } } },
                { "date": "2024-06-05", "day": { "avgtemp_c": 32.2, "avghumidity": 65, "uv": 10.0, "condition": { "text": "Sunny" } } }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn report_contains_summary_series_and_strip() {
        let text = render(&payload(), Metric::Temperature);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Hanoi, Vietnam");
        assert_eq!(lines[1], "6:30 PM, Sat, Jun 1, 2024");
        assert!(lines[2].ends_with("31°C  Light rain"));
        assert_eq!(lines[3], "Humidity: 74%   Wind speed: 9 km/h");
        assert!(text.contains("Temperature: 31°C"));
        assert!(text.contains("  Today   30.5"));
        assert!(text.contains("  Jun 5   32.2"));

        let strip = text.split("Forecast\n").nth(1).unwrap();
        assert_eq!(strip.lines().count(), 4);
        assert!(strip.lines().next().unwrap().starts_with("  Today"));
    }

    #[test]
    fn uv_headline_is_verbatim() {
        let text = render(&payload(), Metric::UvIndex);
        assert!(text.contains("UV Index: 8\n"));
        assert!(text.contains("  Jun 2   6.5"));
    }
}
