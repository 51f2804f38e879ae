//! Request Body Extraction
//!
//! JSON bodies are decoded whether or not the client sent a JSON
//! `Content-Type`. Only a body that declares itself JSON and fails to parse
//! is rejected; anything else that is not a JSON object decodes as an empty
//! request and is left to validation.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, TaskError};

/// Lenient JSON body extractor.
///
/// Rejects with `TaskError::BadRequest` so failures share the service's
/// error envelope.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let declared_json = declares_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| TaskError::BadRequest(rejection.body_text()))?;

        decode_body(&bytes, declared_json).map(LenientJson)
    }
}

/// Whether the request labels its body as JSON (`application/json` or a
/// `+json` suffix type).
fn declares_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Decodes a request body into `T`.
///
/// - An empty body is an empty request.
/// - A JSON object is decoded field by field.
/// - A JSON array is an empty request.
/// - When the body is declared JSON, a syntax error or a bare scalar is a
///   bad request. Otherwise both fall back to an empty request.
pub fn decode_body<T>(bytes: &[u8], declared_json: bool) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value = match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => value,
        Err(e) if declared_json => {
            return Err(TaskError::BadRequest(format!("Malformed JSON body: {e}")));
        }
        Err(_) => return Ok(T::default()),
    };

    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| TaskError::BadRequest(format!("Malformed JSON body: {e}"))),
        Value::Array(_) => Ok(T::default()),
        _ if declared_json => Err(TaskError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        _ => Ok(T::default()),
    }
}
