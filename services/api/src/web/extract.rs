//! services/api/src/web/extract.rs
//!
//! Request body extraction that matches how clients of the shop have always
//! been treated: a missing or non-JSON body reads as `{}`, and badly typed
//! fields read as absent, so the shop reports its own validation errors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as `{"error": ...}`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// A string field; any other JSON type (null, number...) reads as empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// A numeric id; strings, negatives and out-of-range numbers read as absent.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_string")]
        name: String,
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<u32>,
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/plain"));
    }

    #[test]
    fn badly_typed_fields_read_as_absent() {
        let sample: Sample = serde_json::from_str(r#"{"name": null, "id": "1"}"#).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.id, None);

        let sample: Sample = serde_json::from_str(r#"{"name": 5, "id": -3}"#).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.id, None);

        let sample: Sample = serde_json::from_str(r#"{"name": "Ana", "id": 4}"#).unwrap();
        assert_eq!(sample.name, "Ana");
        assert_eq!(sample.id, Some(4));
    }
}
