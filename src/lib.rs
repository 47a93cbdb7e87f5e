pub mod config;
mod utils;

pub use config::Config;
pub use utils::functions::base::{FunctionCall, FunctionDeclaration, FunctionDeclarationName};
pub use utils::functions::business_hours::{
  parse_weekday_name, weekday_name, BusinessHours, BusinessHoursRequest, BusinessHoursService,
  OpenStatusRequest, OpeningHours, TimeOfDay, WeekdaySchedule, INVALID_DAY, INVALID_DAY_STATUS,
  OFFICE_CLOSED, OFFICE_OPEN,
};
pub use utils::functions::get_search_results::{SearchClient, SearchRequest, SEARCH_ERROR};
pub use utils::functions::get_weather::{WeatherClient, WeatherRequest, WEATHER_ERROR};
pub use utils::functions::{function_declarations, Functions};
pub use utils::response::error_payload;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("request failed: {0}")]
  Fetch(#[from] reqwest::Error),
  #[error("invalid time format {value:?}, expected HH:MM")]
  InvalidTimeFormat {
    value: String,
    #[source]
    source: Option<chrono::ParseError>,
  },
  #[error("invalid function arguments: {0}")]
  InvalidArguments(#[source] serde_json::Error),
  #[error("failed to encode function response: {0}")]
  Encode(#[source] serde_json::Error),
  #[error("unknown function: {0}")]
  UnknownFunction(String),
  #[error("unexpected response: {0}")]
  UnexpectedResponse(String),
  #[error("configuration error: {0}")]
  Config(String),
}
