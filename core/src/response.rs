//! Decoded `(status, body)` pair returned by every client operation.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{AuthKey, Pet, PetList};

/// Response body: JSON when it parses as JSON, raw text otherwise.
///
/// The service answers errors with HTML pages, so text bodies are normal.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// Status code plus decoded body. No status is treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl From<HttpResponse> for ApiResponse {
    fn from(response: HttpResponse) -> Self {
        let body = match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(response.body),
        };
        Self {
            status: response.status,
            body,
        }
    }
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json()?.as_object()?.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }

    /// The `key` field, if present and non-empty.
    pub fn auth_key(&self) -> Option<AuthKey> {
        self.field_str("key")
            .filter(|k| !k.is_empty())
            .map(AuthKey::new)
    }

    /// Whole body as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone())
                .map_err(|e| ApiError::Deserialization(e.to_string())),
            ResponseBody::Text(text) => Err(ApiError::Deserialization(format!(
                "status {} body is not JSON: {}",
                self.status,
                truncate(text)
            ))),
        }
    }

    pub fn pet(&self) -> Result<Pet, ApiError> {
        self.decode()
    }

    pub fn pet_list(&self) -> Result<PetList, ApiError> {
        if self.json().is_some() && !self.has_field("pets") {
            return Err(ApiError::MissingField("pets"));
        }
        self.decode()
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(120) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
