use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Full forecast response from the provider's `forecast.json` endpoint.
///
/// Only the fields the dashboard actually renders are modelled; everything
/// else in the response body is ignored by serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

impl WeatherPayload {
    /// Forecast days in chronological order.
    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }

    /// The first forecast day, which the provider always reports as "today".
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    /// Wall-clock time at the location, e.g. `2024-03-05 9:15`.
    #[serde(with = "local_time")]
    pub localtime: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub condition: Condition,
    #[serde(with = "local_time")]
    pub last_updated: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DayStats,
}

/// Daily aggregates for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub avgtemp_c: f64,
    pub avghumidity: f64,
    pub uv: f64,
    pub condition: Condition,
}

/// One autocomplete candidate from the provider's `search.json` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.region, self.country)
    }
}

/// Forecast field that drives the chart and the headline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    Temperature,
    UvIndex,
    Humidity,
}

impl Metric {
    pub const fn all() -> &'static [Metric] {
        &[Metric::Temperature, Metric::UvIndex, Metric::Humidity]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::UvIndex => "UV Index",
            Metric::Humidity => "Humidity",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Metric::Temperature => 0,
            Metric::UvIndex => 1,
            Metric::Humidity => 2,
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown metric '{0}'. Supported metrics: temperature, uv, humidity.")]
pub struct UnknownMetric(String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "temperature" | "temp" => Ok(Metric::Temperature),
            "uv" | "uv-index" | "uv_index" => Ok(Metric::UvIndex),
            "humidity" => Ok(Metric::Humidity),
            _ => Err(UnknownMetric(value.to_string())),
        }
    }
}

/// weatherapi.com reports local times as `YYYY-MM-DD H:MM` without seconds.
mod local_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(D::Error::custom)
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_payload_deserializes_provider_shape() {
        let payload = fixtures::payload();

        assert_eq!(payload.location.name, "London");
        assert_eq!(payload.current.humidity, 81);
        assert_eq!(payload.days().len(), 5);
        assert_eq!(payload.today().map(|d| d.day.avghumidity), Some(78.0));
        assert_eq!(
            payload.location.localtime,
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .and_then(|d| d.and_hms_opt(9, 7, 0))
                .expect("valid date")
        );
    }

    #[test]
    fn bad_localtime_is_a_parse_error() {
        let mut body = fixtures::forecast_json();
        body["location"]["localtime"] = "yesterday".into();

        assert!(serde_json::from_value::<WeatherPayload>(body).is_err());
    }

    #[test]
    fn suggestion_displays_name_region_country() {
        let s = Suggestion {
            name: "Paris".into(),
            region: "Ile-de-France".into(),
            country: "France".into(),
        };
        assert_eq!(s.to_string(), "Paris, Ile-de-France, France");
    }

    #[test]
    fn metric_cycles_in_both_directions() {
        assert_eq!(Metric::Temperature.next(), Metric::UvIndex);
        assert_eq!(Metric::Humidity.next(), Metric::Temperature);
        assert_eq!(Metric::Temperature.prev(), Metric::Humidity);
        assert_eq!(Metric::default(), Metric::Temperature);
    }

    #[test]
    fn metric_parses_cli_names() {
        assert_eq!("UV".parse::<Metric>().ok(), Some(Metric::UvIndex));
        assert_eq!("humidity".parse::<Metric>().ok(), Some(Metric::Humidity));
        let err = "pressure".parse::<Metric>().unwrap_err();
        assert!(err.to_string().contains("Unknown metric"));
    }
}
