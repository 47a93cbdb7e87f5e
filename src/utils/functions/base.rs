use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum FunctionDeclarationName {
  GetSearchResults,
  GetCurrentWeather,
  GetBusinessHours,
  IsBusinessOpen,
}

impl FunctionDeclarationName {
  pub const ALL: [FunctionDeclarationName; 4] = [
    FunctionDeclarationName::GetSearchResults,
    FunctionDeclarationName::GetCurrentWeather,
    FunctionDeclarationName::GetBusinessHours,
    FunctionDeclarationName::IsBusinessOpen,
  ];

  /// Name the model uses to call the function.
  pub fn as_str(&self) -> &'static str {
    match self {
      FunctionDeclarationName::GetSearchResults => "get_search_results",
      FunctionDeclarationName::GetCurrentWeather => "get_current_weather",
      FunctionDeclarationName::GetBusinessHours => "get_business_hours",
      FunctionDeclarationName::IsBusinessOpen => "is_business_open",
    }
  }
}

impl FromStr for FunctionDeclarationName {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|name| name.as_str() == s)
      .ok_or_else(|| crate::Error::UnknownFunction(s.to_owned()))
  }
}

impl From<FunctionDeclarationName> for &'static str {
  fn from(name: FunctionDeclarationName) -> Self {
    name.as_str()
  }
}

impl TryFrom<String> for FunctionDeclarationName {
  type Error = crate::Error;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    name.parse()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
  pub name: FunctionDeclarationName,
  pub description: String,
  pub parameters: Value,
}

/// A function invocation as emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
  pub name: String,
  #[serde(default)]
  pub arguments: Value,
}

impl FunctionCall {
  pub fn new(name: &str, arguments: Value) -> Self {
    Self {
      name: name.to_owned(),
      arguments,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_use_wire_format() {
    let name = serde_json::to_value(FunctionDeclarationName::IsBusinessOpen).unwrap();
    assert_eq!(name, Value::from("is_business_open"));
    assert_eq!(
      "get_current_weather".parse::<FunctionDeclarationName>().unwrap(),
      FunctionDeclarationName::GetCurrentWeather
    );
  }

  #[test]
  fn every_name_round_trips_through_serde() {
    for name in FunctionDeclarationName::ALL {
      let wire = serde_json::to_value(name).unwrap();
      assert_eq!(wire, Value::from(name.as_str()));
      assert_eq!(serde_json::from_value::<FunctionDeclarationName>(wire).unwrap(), name);
      assert_eq!(name.as_str().parse::<FunctionDeclarationName>().unwrap(), name);
    }
    assert!(serde_json::from_value::<FunctionDeclarationName>(Value::from("book_meeting")).is_err());
  }

  #[test]
  fn unknown_name_is_rejected() {
    let err = "book_meeting".parse::<FunctionDeclarationName>().unwrap_err();
    assert!(matches!(err, crate::Error::UnknownFunction(name) if name == "book_meeting"));
  }

  #[test]
  fn missing_arguments_default_to_null() {
    let call: FunctionCall = serde_json::from_str(r#"{"name":"is_business_open"}"#).unwrap();
    assert!(call.arguments.is_null());
  }
}
