//! User-facing strings. The dashboard ships a single English locale.

pub const CITY_NOT_FOUND: &str = "City not found. Please enter a valid city name.";
pub const FETCH_FAILED: &str = "Something went wrong while fetching weather data.";
pub const EMPTY_CITY: &str = "Please enter a city name.";
pub const LOADING: &str = "Loading...";
pub const TODAY: &str = "Today";
pub const HUMIDITY: &str = "Humidity";
pub const WIND_SPEED: &str = "Wind speed";
pub const YOUR_CITY: &str = "Your city";
pub const INPUT_PLACEHOLDER: &str = "Enter a city name";
