use serde::Serialize;
use serde_json::json;

/// Error payload returned to the model when a collaborator fails.
pub fn error_payload(message: &str) -> String {
  json!({ "error": message }).to_string()
}

/// Encodes a response value as the JSON text handed back to the model.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, crate::Error> {
  serde_json::to_string(value).map_err(crate::Error::Encode)
}

/// Collapses a collaborator result into the response content, logging the
/// failure and substituting the fallback payload.
pub fn or_error_payload(result: Result<String, crate::Error>, function: &str, fallback: &str) -> String {
  match result {
    Ok(content) => content,
    Err(err) => {
      tracing::error!(function, error = %err, "collaborator request failed");
      error_payload(fallback)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_payload_shape() {
    assert_eq!(error_payload("Failed to get weather"), r#"{"error":"Failed to get weather"}"#);
  }

  #[test]
  fn unencodable_response_is_an_encode_error() {
    let keyed_by_bytes = std::collections::BTreeMap::from([(vec![1u8, 2], "hours")]);
    let err = to_json(&keyed_by_bytes).unwrap_err();
    assert!(matches!(err, crate::Error::Encode(_)));
    assert!(err.to_string().starts_with("failed to encode function response"));
  }

  #[test]
  fn failure_falls_back() {
    let failed = Err(crate::Error::Config("no key".to_owned()));
    assert_eq!(
      or_error_payload(failed, "get_search_results", "Failed to get search results"),
      r#"{"error":"Failed to get search results"}"#
    );
    assert_eq!(or_error_payload(Ok("\"sunny\"".to_owned()), "x", "y"), "\"sunny\"");
  }
}
