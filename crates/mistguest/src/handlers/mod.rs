// Route handlers, one module per resource.

pub mod clients;
pub mod connection;
pub mod guests;
pub mod import;
pub mod sites;

use axum::body::Bytes;
use axum::extract::FromRequestParts;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;

/// `axum::extract::Path` answering malformed segments in the JSON envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query` answering malformed query strings in the JSON
/// envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// Decode a JSON object body. An absent body, `null`, and `{}` all count
/// as "no data".
pub(crate) fn json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::no_data());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?;
    match &value {
        Value::Null => return Err(ApiError::no_data()),
        Value::Object(map) if map.is_empty() => return Err(ApiError::no_data()),
        Value::Object(_) => {}
        _ => return Err(ApiError::bad_request("Request body must be a JSON object")),
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MinutesValue {
    Number(u32),
    Text(String),
}

/// Accept `minutes` as a number or a numeric string (CSV imports send the
/// latter). Blank strings count as absent.
pub(crate) fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<MinutesValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(MinutesValue::Number(n)) => Ok(Some(n)),
        Some(MinutesValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid minutes value: {text:?}")))
        }
    }
}
