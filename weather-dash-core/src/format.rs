//! Pure transforms from a [`WeatherPayload`] to the strings and series the
//! dashboard shows. Nothing here touches the network or the view state.

use chrono::NaiveDate;

use crate::{
    messages,
    model::{DayStats, Location, Metric, WeatherPayload},
};

/// Number of cards in the forecast strip.
pub const FORECAST_CARDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Cloud,
    Sun,
    Rain,
    Snow,
}

impl WeatherIcon {
    /// Keyword match on the provider's condition text. Rules are checked in
    /// order and the first hit wins, so "Partly cloudy" with sun is a cloud.
    pub fn from_condition(text: &str) -> Self {
        let text = text.to_lowercase();

        if text.contains("cloud") {
            WeatherIcon::Cloud
        } else if text.contains("sun") || text.contains("clear") {
            WeatherIcon::Sun
        } else if text.contains("rain") {
            WeatherIcon::Rain
        } else if text.contains("snow") {
            WeatherIcon::Snow
        } else {
            WeatherIcon::Cloud
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Cloud => "☁️",
            WeatherIcon::Sun => "☀️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Snow => "❄️",
        }
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> f64 {
    // `+ 0.0` folds a negative zero into zero.
    (value + 0.5).floor() + 0.0
}

pub fn metric_value(day: &DayStats, metric: Metric) -> f64 {
    match metric {
        Metric::Temperature => day.avgtemp_c,
        Metric::UvIndex => day.uv,
        Metric::Humidity => day.avghumidity,
    }
}

/// One value per forecast day, in chronological order, unrounded.
pub fn chart_series(payload: &WeatherPayload, metric: Metric) -> Vec<f64> {
    payload.days().iter().map(|d| metric_value(&d.day, metric)).collect()
}

/// Day labels matching [`chart_series`] point for point.
pub fn chart_labels(payload: &WeatherPayload) -> Vec<String> {
    payload.days().iter().enumerate().map(|(i, d)| date_label(i, d.date)).collect()
}

pub fn format_metric(value: f64, metric: Metric) -> String {
    match metric {
        Metric::Temperature => temperature_label(value),
        Metric::UvIndex => value.to_string(),
        Metric::Humidity => humidity_label(value),
    }
}

/// Headline for the selected metric, taken from the first forecast day.
/// Empty when there is nothing to show.
pub fn headline_value(payload: Option<&WeatherPayload>, metric: Metric) -> String {
    payload
        .and_then(WeatherPayload::today)
        .map(|d| format_metric(metric_value(&d.day, metric), metric))
        .unwrap_or_default()
}

pub fn temperature_label(celsius: f64) -> String {
    format!("{}°C", round_half_up(celsius))
}

pub fn humidity_label(percent: f64) -> String {
    format!("{}%", round_half_up(percent))
}

pub fn wind_label(kph: f64) -> String {
    format!("{} km/h", round_half_up(kph))
}

/// "Today" for the first forecast day whatever its date, `Mar 6` otherwise.
pub fn date_label(index: usize, date: NaiveDate) -> String {
    if index == 0 {
        messages::TODAY.to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// `London, United Kingdom`, or just the name when the country is missing.
pub fn place_label(location: &Location) -> String {
    if location.country.is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country)
    }
}

/// Location-local time, e.g. `9:07 AM, Tue, Mar 5, 2024`.
pub fn local_datetime_label(payload: Option<&WeatherPayload>) -> String {
    match payload {
        Some(p) => p.location.localtime.format("%-I:%M %p, %a, %b %-d, %Y").to_string(),
        None => messages::LOADING.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub label: String,
    pub icon: WeatherIcon,
    pub is_today: bool,
    pub humidity: String,
}

/// The first [`FORECAST_CARDS`] days, or fewer if the provider sent fewer.
pub fn forecast_cards(payload: &WeatherPayload) -> Vec<ForecastCard> {
    payload
        .days()
        .iter()
        .take(FORECAST_CARDS)
        .enumerate()
        .map(|(i, d)| ForecastCard {
            label: date_label(i, d.date),
            icon: WeatherIcon::from_condition(&d.day.condition.text),
            is_today: i == 0,
            humidity: humidity_label(d.day.avghumidity),
        })
        .collect()
}
