pub mod base;
pub mod business_hours;
pub mod get_search_results;
pub mod get_weather;

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::Error;
use base::{FunctionCall, FunctionDeclaration, FunctionDeclarationName};
use business_hours::{BusinessHoursService, WeekdaySchedule};
use get_search_results::SearchClient;
use get_weather::WeatherClient;

lazy_static! {
  static ref FUNCTION_DECLARATIONS: Vec<FunctionDeclaration> = vec![
    get_search_results::get_search_results_fn(),
    get_weather::get_current_weather_fn(),
    business_hours::get_business_hours_fn(),
    business_hours::is_business_open_fn(),
  ];
}

/// Declarations for every callable function, in a fixed order.
pub fn function_declarations() -> &'static [FunctionDeclaration] {
  &FUNCTION_DECLARATIONS
}

/// Routes model-issued function calls to their implementations.
pub struct Functions {
  business_hours: BusinessHoursService,
  weather: WeatherClient,
  search: SearchClient,
}

impl Functions {
  pub fn new(config: &Config) -> Self {
    Self::with_schedule(config, WeekdaySchedule::default())
  }

  pub fn with_schedule(config: &Config, schedule: WeekdaySchedule) -> Self {
    Functions {
      business_hours: BusinessHoursService::new(schedule, config.business_timezone),
      weather: WeatherClient::new(&config.weather_api_url, config.weather_timezone),
      search: SearchClient::new(&config.search_api_url, config.serpapi_api_key.clone()),
    }
  }

  pub fn business_hours(&self) -> &BusinessHoursService {
    &self.business_hours
  }

  pub async fn call(&self, call: &FunctionCall) -> Result<String, Error> {
    let name: FunctionDeclarationName = call.name.parse()?;
    debug!(function = name.as_str(), arguments = %call.arguments, "calling function");

    match name {
      FunctionDeclarationName::GetSearchResults => {
        let request = arguments(&call.arguments)?;
        Ok(self.search.get_search_results(&request).await)
      }
      FunctionDeclarationName::GetCurrentWeather => {
        let request = arguments(&call.arguments)?;
        Ok(self.weather.get_current_weather(&request).await)
      }
      FunctionDeclarationName::GetBusinessHours => {
        self.business_hours.get_business_hours(&arguments(&call.arguments)?)
      }
      FunctionDeclarationName::IsBusinessOpen => {
        self.business_hours.is_business_open(&arguments(&call.arguments)?)
      }
    }
  }
}

/// Missing arguments are read as an empty object.
fn arguments<T: DeserializeOwned>(arguments: &Value) -> Result<T, Error> {
  let value = if arguments.is_null() {
    Value::Object(Default::default())
  } else {
    arguments.clone()
  };
  serde_json::from_value(value).map_err(Error::InvalidArguments)
}

#[cfg(test)]
mod tests {
  use super::*;
  use business_hours::{OFFICE_CLOSED, OFFICE_OPEN};
  use serde_json::json;

  fn functions() -> Functions {
    Functions::new(&Config::default())
  }

  #[test]
  fn declarations_cover_every_function() {
    let names: Vec<&str> = function_declarations()
      .iter()
      .map(|declaration| declaration.name.as_str())
      .collect();
    assert_eq!(
      names,
      vec!["get_search_results", "get_current_weather", "get_business_hours", "is_business_open"]
    );
  }

  #[test]
  fn declarations_serialize_as_schema() {
    let weather = serde_json::to_value(get_weather::get_current_weather_fn()).unwrap();
    assert_eq!(weather["name"], json!("get_current_weather"));
    assert_eq!(weather["parameters"]["required"], json!(["longitude", "latitude"]));

    let hours = serde_json::to_value(business_hours::get_business_hours_fn()).unwrap();
    assert_eq!(hours["parameters"]["properties"]["day"]["enum"].as_array().unwrap().len(), 7);
  }

  #[tokio::test]
  async fn dispatches_business_hours() {
    let functions = functions();
    let call = FunctionCall::new("get_business_hours", json!({ "day": "Monday" }));
    assert_eq!(
      functions.call(&call).await.unwrap(),
      r#"{"Monday":{"open":"8:00","close":"19:00"}}"#
    );

    let call = FunctionCall::new("get_business_hours", Value::Null);
    let all: Value = serde_json::from_str(&functions.call(&call).await.unwrap()).unwrap();
    assert_eq!(all.as_object().unwrap().len(), 7);
  }

  #[tokio::test]
  async fn dispatches_open_status() {
    let functions = functions();
    let open = FunctionCall::new(
      "is_business_open",
      json!({ "current_day": "Monday", "current_time": "09:00" }),
    );
    assert_eq!(functions.call(&open).await.unwrap(), OFFICE_OPEN);

    let closed = FunctionCall::new(
      "is_business_open",
      json!({ "current_day": "Monday", "current_time": "07:59" }),
    );
    assert_eq!(functions.call(&closed).await.unwrap(), OFFICE_CLOSED);
  }

  #[tokio::test]
  async fn rejects_unknown_function() {
    let call = FunctionCall::new("book_meeting", json!({}));
    let err = functions().call(&call).await.unwrap_err();
    assert!(matches!(err, Error::UnknownFunction(_)));
  }

  #[tokio::test]
  async fn rejects_malformed_arguments() {
    let functions = functions();
    let call = FunctionCall::new("get_current_weather", json!({ "longitude": "west" }));
    assert!(matches!(functions.call(&call).await.unwrap_err(), Error::InvalidArguments(_)));

    let call = FunctionCall::new("get_business_hours", json!({ "day": 3 }));
    assert!(matches!(functions.call(&call).await.unwrap_err(), Error::InvalidArguments(_)));
  }
}
