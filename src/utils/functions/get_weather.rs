use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

use super::base::{FunctionDeclaration, FunctionDeclarationName};
use crate::utils::response::{or_error_payload, to_json};
use crate::Error;

pub const WEATHER_ERROR: &str = "Failed to get weather";

pub fn get_current_weather_fn() -> FunctionDeclaration {
  FunctionDeclaration {
    name: FunctionDeclarationName::GetCurrentWeather,
    description: String::from("Get the current weather for a location"),
    parameters: serde_json::json!({
      "type": "object",
      "properties": {
        "longitude": {
          "type": "number",
          "description": "The approximate longitude of the location"
        },
        "latitude": {
          "type": "number",
          "description": "The approximate latitude of the location"
        }
      },
      "required": ["longitude", "latitude"]
    }),
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRequest {
  pub longitude: f64,
  pub latitude: f64,
}

pub struct WeatherClient {
  client: reqwest::Client,
  endpoint: String,
  timezone: Tz,
}

impl WeatherClient {
  pub fn new(endpoint: &str, timezone: Tz) -> Self {
    WeatherClient {
      client: reqwest::Client::new(),
      endpoint: endpoint.to_owned(),
      timezone,
    }
  }

  /// Current conditions as JSON, or the weather error payload.
  pub async fn get_current_weather(&self, request: &WeatherRequest) -> String {
    or_error_payload(
      self.fetch_current_weather(request).await,
      "get_current_weather",
      WEATHER_ERROR,
    )
  }

  async fn fetch_current_weather(&self, request: &WeatherRequest) -> Result<String, Error> {
    let params = [
      ("latitude", request.latitude.to_string()),
      ("longitude", request.longitude.to_string()),
      ("current_weather", String::from("true")),
      ("timezone", self.timezone.name().to_owned()),
    ];
    let resp = self
      .client
      .get(&self.endpoint)
      .query(&params)
      .send()
      .await?
      .error_for_status()?;
    let data: Value = resp.json().await?;
    current_weather(data)
  }
}

fn current_weather(mut data: Value) -> Result<String, Error> {
  match data.get_mut("current_weather").map(Value::take) {
    Some(current) if !current.is_null() => to_json(&current),
    _ => Err(Error::UnexpectedResponse(String::from(
      "forecast has no current_weather",
    ))),
  }
}
