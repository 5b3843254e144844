//! JSON body extractor with content-type enforcement.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Reads the request body as JSON.
///
/// - A `Content-Type` other than `application/json` (or a `+json` suffix)
///   is rejected with 415.
/// - An empty body deserializes from `null`, so `JsonBody<Value>` yields
///   [`Value::Null`] and payload validation decides what to do with it.
/// - Malformed JSON is rejected with 400.
///
/// Unlike `axum::Json`, a missing `Content-Type` header is accepted.
#[derive(Debug, Clone)]
pub struct JsonBody<T = Value>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_json_content_type(content_type) {
                return Err(AppError::UnsupportedMediaType(format!(
                    "Content-Type must be application/json, got '{}'",
                    content_type
                ))
                .into_response());
            }
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };

        parsed
            .map(JsonBody)
            .map_err(|e| AppError::InvalidJson(format!("JSON parse error: {}", e)).into_response())
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
