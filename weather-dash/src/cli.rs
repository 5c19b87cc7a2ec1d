use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_dash_core::{Config, Metric, messages, provider_from_config};

use crate::{logging, report, tui};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and the default city.
    Configure,

    /// Print current conditions and the forecast for a city, then exit.
    Show {
        /// City name, e.g. "Hanoi" or "London".
        city: String,

        /// Metric for the headline and series: temperature, uv or humidity.
        #[arg(long, default_value = "temperature")]
        metric: Metric,
    },

    /// Open the interactive dashboard (the default).
    Dashboard {
        /// City to open with instead of the configured default.
        #[arg(long)]
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard { city: None }) {
            Command::Configure => {
                logging::init_stderr();
                configure()
            }
            Command::Show { city, metric } => {
                logging::init_stderr();
                show(&city, metric).await
            }
            Command::Dashboard { city } => {
                let log_path = logging::init_file()?;
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let city = dashboard_city(city, &config);

                tracing::info!(%city, log = %log_path.display(), "starting dashboard");
                tui::run(provider, &city)
            }
        }
    }
}

/// `--city` when it has any content, the configured default otherwise.
fn dashboard_city(flag: Option<String>, config: &Config) -> String {
    flag.as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.initial_city())
        .to_string()
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current_city = config.initial_city().to_string();

    let mut key_prompt = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if config.api_key.is_some() {
        key_prompt = key_prompt.with_help_message("leave empty to keep the current key");
    }
    let api_key = key_prompt.prompt()?;

    let city = Text::new("Default city:").with_default(&current_city).prompt()?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }
    if config.api_key.is_none() {
        bail!(
            "An API key is required. \
             Get one at https://www.weatherapi.com/ and run `weather-dash configure` again."
        );
    }
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(city: &str, metric: Metric) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        bail!(messages::EMPTY_CITY);
    }

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let payload = provider.forecast(city).await.map_err(|e| {
        tracing::warn!(%city, error = %e, "forecast fetch failed");
        anyhow!(e.user_message())
    })?;

    print!("{}", report::render(&payload, metric));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["weather-dash"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_parses_metric() {
        let cli = Cli::try_parse_from(["weather-dash", "show", "Hanoi", "--metric", "uv"]).unwrap();
        match cli.command {
            Some(Command::Show { city, metric }) => {
                assert_eq!(city, "Hanoi");
                assert_eq!(metric, Metric::UvIndex);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_rejects_unknown_metric() {
        let err = Cli::try_parse_from(["weather-dash", "show", "Hanoi", "--metric", "pressure"]);
        assert!(err.is_err());
    }

    #[test]
    fn dashboard_accepts_city_override() {
        let cli = Cli::try_parse_from(["weather-dash", "dashboard", "--city", "Da Nang"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Dashboard { city: Some(ref c) }) if c == "Da Nang"
        ));
    }

    #[test]
    fn blank_city_flag_falls_back_to_config() {
        let config = Config { default_city: Some("Hanoi".into()), ..Config::default() };

        assert_eq!(dashboard_city(Some("  ".into()), &config), "Hanoi");
        assert_eq!(dashboard_city(None, &config), "Hanoi");
        assert_eq!(dashboard_city(Some(" Da Nang ".into()), &config), "Da Nang");
        assert_eq!(dashboard_city(Some("".into()), &Config::default()), "London");
    }
}
