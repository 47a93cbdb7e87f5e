use chrono_tz::Tz;

use crate::Error;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_SEARCH_API_URL: &str = "https://serpapi.com/search.json";

#[derive(Debug, Clone)]
pub struct Config {
  pub weather_api_url: String,
  /// Timezone the forecast is reported in.
  pub weather_timezone: Tz,
  pub search_api_url: String,
  pub serpapi_api_key: Option<String>,
  /// Timezone used to derive the current day and time for open status checks.
  pub business_timezone: Tz,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      weather_api_url: DEFAULT_WEATHER_API_URL.to_owned(),
      weather_timezone: chrono_tz::Europe::London,
      search_api_url: DEFAULT_SEARCH_API_URL.to_owned(),
      serpapi_api_key: None,
      business_timezone: chrono_tz::Europe::London,
    }
  }
}

impl Config {
  /// Reads the process environment, after loading `.env` if one is present.
  pub fn from_env() -> Result<Self, Error> {
    dotenv::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, Error> {
    let defaults = Config::default();
    Ok(Config {
      weather_api_url: lookup("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
      weather_timezone: timezone(&lookup, "WEATHER_TIMEZONE", defaults.weather_timezone)?,
      search_api_url: lookup("SEARCH_API_URL").unwrap_or(defaults.search_api_url),
      serpapi_api_key: lookup("SERPAPI_API_KEY").filter(|key| !key.is_empty()),
      business_timezone: timezone(&lookup, "BUSINESS_TIMEZONE", defaults.business_timezone)?,
    })
  }
}

fn timezone<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: Tz) -> Result<Tz, Error> {
  match lookup(key) {
    Some(name) => name
      .parse()
      .map_err(|_| Error::Config(format!("{} is not a known timezone: {}", key, name))),
    None => Ok(default),
  }
}
