//! Stateless HTTP request builder and response decoder for the Pet Friends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation has a `build_*` method that produces an
//! `HttpRequest`; every response goes through the single `parse` method,
//! since the service contract is "status code plus body" for all of them.
//! The caller executes the HTTP round-trip in between.

use tracing::debug;

use crate::error::ApiError;
use crate::form::{self, MultipartBody};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;
use crate::types::{AuthKey, Credentials, PetFields, PetFilter, Photo};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the Pet Friends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/key` with the credentials as headers.
    pub fn build_get_auth_key(&self, credentials: &Credentials) -> HttpRequest {
        self.request(
            HttpMethod::Post,
            "/api/key",
            vec![
                ("email".to_string(), credentials.email.clone()),
                ("password".to_string(), credentials.password.clone()),
            ],
            None,
        )
    }

    pub fn build_get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/pets?filter={}", filter.as_str()),
            vec![auth_header(auth_key)],
            None,
        )
    }

    /// Multipart create with photo.
    pub fn build_add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        photo: &Photo,
    ) -> Result<HttpRequest, ApiError> {
        let body = form::multipart(Some(fields), photo)?;
        Ok(self.multipart(HttpMethod::Post, "/api/pets", auth_key, body))
    }

    pub fn build_add_new_pet_no_photo(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
    ) -> Result<HttpRequest, ApiError> {
        self.urlencoded(HttpMethod::Post, "/api/create_pet_simple", auth_key, fields)
    }

    pub fn build_update_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> Result<HttpRequest, ApiError> {
        self.urlencoded(HttpMethod::Put, &format!("/api/pets/{pet_id}"), auth_key, fields)
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            &format!("/api/pets/{pet_id}"),
            vec![auth_header(auth_key)],
            None,
        )
    }

    pub fn build_add_photo_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo: &Photo,
    ) -> Result<HttpRequest, ApiError> {
        let body = form::multipart(None, photo)?;
        Ok(self.multipart(
            HttpMethod::Post,
            &format!("/api/pets/set_photo/{pet_id}"),
            auth_key,
            body,
        ))
    }

    /// Decode any response. Never fails: non-JSON bodies are kept as text.
    pub fn parse(&self, response: HttpResponse) -> ApiResponse {
        debug!(status = response.status, bytes = response.body.len(), "response received");
        ApiResponse::from(response)
    }

    fn multipart(
        &self,
        method: HttpMethod,
        path: &str,
        auth_key: &AuthKey,
        body: MultipartBody,
    ) -> HttpRequest {
        let headers = vec![
            auth_header(auth_key),
            ("content-type".to_string(), body.content_type),
        ];
        self.request(method, path, headers, Some(body.bytes))
    }

    fn urlencoded(
        &self,
        method: HttpMethod,
        path: &str,
        auth_key: &AuthKey,
        fields: &PetFields,
    ) -> Result<HttpRequest, ApiError> {
        let body = form::urlencoded(fields)?;
        let headers = vec![
            auth_header(auth_key),
            ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
        ];
        Ok(self.request(method, path, headers, Some(body)))
    }

    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> HttpRequest {
        let path = format!("{}{path}", self.base_url);
        debug!(method = method.as_str(), url = %path, "request built");
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

fn auth_header(auth_key: &AuthKey) -> (String, String) {
    ("auth_key".to_string(), auth_key.as_str().to_string())
}
