//! One call per service operation: build, execute, decode.

use std::path::Path;
use std::time::Duration;

use crate::client::PetFriendsClient;
use crate::config::Settings;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{AuthKey, Credentials, PetFields, PetFilter, Photo};

/// Pass-through client: no validation, no retries, no status interpretation.
#[derive(Debug, Clone)]
pub struct PetFriends<T = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        let mut transport = UreqTransport::new(timeout);
        if let Some(limit) = settings.max_response_bytes {
            transport = transport.with_body_limit(limit);
        }
        Self::with_transport(&settings.base_url, transport)
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PetFriendsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    pub fn get_auth_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_auth_key(&Credentials::new(email, password)))
    }

    pub fn get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: PetFilter,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_list_of_pets(auth_key, filter))
    }

    /// Reads `photo_path` before sending; an unreadable file is an error,
    /// not a request without a photo.
    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = Photo::from_path(photo_path)?;
        self.send(self.client.build_add_new_pet(auth_key, fields, &photo)?)
    }

    pub fn add_new_pet_no_photo(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_add_new_pet_no_photo(auth_key, fields)?)
    }

    pub fn update_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_update_pet(auth_key, pet_id, fields)?)
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }

    pub fn add_photo_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = Photo::from_path(photo_path)?;
        self.send(self.client.build_add_photo_of_pet(auth_key, pet_id, &photo)?)
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        Ok(self.client.parse(response))
    }
}
