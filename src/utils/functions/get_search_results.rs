use serde::Deserialize;
use serde_json::Value;

use super::base::{FunctionDeclaration, FunctionDeclarationName};
use crate::utils::response::{or_error_payload, to_json};
use crate::Error;

pub const SEARCH_ERROR: &str = "Failed to get search results";

pub fn get_search_results_fn() -> FunctionDeclaration {
  FunctionDeclaration {
    name: FunctionDeclarationName::GetSearchResults,
    description: String::from("Used to get search results when the user asks for it"),
    parameters: serde_json::json!({
      "type": "object",
      "properties": {
        "query": {
          "type": "string",
          "description": "The query to search for"
        }
      }
    }),
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
  #[serde(default)]
  pub query: String,
}

pub struct SearchClient {
  client: reqwest::Client,
  endpoint: String,
  api_key: Option<String>,
}

impl SearchClient {
  pub fn new(endpoint: &str, api_key: Option<String>) -> Self {
    SearchClient {
      client: reqwest::Client::new(),
      endpoint: endpoint.to_owned(),
      api_key,
    }
  }

  /// Best answer for the query as a JSON string, or the search error payload.
  pub async fn get_search_results(&self, request: &SearchRequest) -> String {
    or_error_payload(self.search(request).await, "get_search_results", SEARCH_ERROR)
  }

  async fn search(&self, request: &SearchRequest) -> Result<String, Error> {
    let api_key = self
      .api_key
      .as_deref()
      .ok_or_else(|| Error::Config(String::from("SERPAPI_API_KEY is not set")))?;
    if request.query.trim().is_empty() {
      return Err(Error::UnexpectedResponse(String::from("empty search query")));
    }

    let params = [
      ("engine", "google"),
      ("q", request.query.as_str()),
      ("api_key", api_key),
    ];
    let resp = self
      .client
      .get(&self.endpoint)
      .query(&params)
      .send()
      .await?
      .error_for_status()?;
    let data: Value = resp.json().await?;

    let answer = best_answer(&data)
      .ok_or_else(|| Error::UnexpectedResponse(String::from("no answer in search results")))?;
    to_json(answer)
  }
}

/// Direct answer first, then the answer box snippet, then the top organic result.
fn best_answer(data: &Value) -> Option<&str> {
  let answer_box = &data["answer_box"];
  answer_box["answer"]
    .as_str()
    .or_else(|| answer_box["snippet"].as_str())
    .or_else(|| {
      data["organic_results"]
        .as_array()?
        .iter()
        .find_map(|result| result["snippet"].as_str())
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn prefers_direct_answer() {
    let data = json!({
      "answer_box": { "answer": "42", "snippet": "The answer is 42" },
      "organic_results": [{ "snippet": "Something else" }]
    });
    assert_eq!(best_answer(&data), Some("42"));
  }

  #[test]
  fn falls_back_to_organic_results() {
    let data = json!({
      "organic_results": [{ "title": "no snippet" }, { "snippet": "Rust 1.0 was released in 2015" }]
    });
    assert_eq!(best_answer(&data), Some("Rust 1.0 was released in 2015"));
    assert_eq!(best_answer(&json!({ "search_metadata": {} })), None);
  }

  #[tokio::test]
  async fn missing_api_key_degrades_to_error_payload() {
    let client = SearchClient::new("http://127.0.0.1:9/search.json", None);
    let request = SearchRequest {
      query: String::from("office supply stores near me"),
    };
    assert_eq!(
      client.get_search_results(&request).await,
      r#"{"error":"Failed to get search results"}"#
    );
  }

  #[tokio::test]
  async fn unreachable_endpoint_degrades_to_error_payload() {
    let client = SearchClient::new("http://127.0.0.1:9/search.json", Some(String::from("key")));
    let request = SearchRequest {
      query: String::from("weather in London"),
    };
    assert_eq!(
      client.get_search_results(&request).await,
      r#"{"error":"Failed to get search results"}"#
    );
  }
}
