//! Request body encoders for the two form flavours the service accepts.
//!
//! `multipart/form-data` carries photo uploads; everything else goes as
//! `application/x-www-form-urlencoded`. Both are rendered to bytes here so
//! the client stays I/O-free.

use std::io::Read;

use ureq::unversioned::multipart::{Form, Part};

use crate::error::ApiError;
use crate::types::{PetFields, Photo};

/// Form field the service reads uploads from.
pub const PHOTO_FIELD: &str = "pet_photo";

/// Encode `fields` as an url-encoded form body.
pub fn urlencoded(fields: &PetFields) -> Result<Vec<u8>, ApiError> {
    serde_urlencoded::to_string(fields)
        .map(String::into_bytes)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

/// A rendered `multipart/form-data` body and its `content-type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Encode the pet's text fields (if any) followed by `photo` as a multipart
/// body with a fresh random boundary.
pub fn multipart(fields: Option<&PetFields>, photo: &Photo) -> Result<MultipartBody, ApiError> {
    let part = Part::bytes(&photo.bytes)
        .file_name(&photo.file_name)
        .mime_str(&photo.content_type)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;

    let mut form = Form::new();
    if let Some(fields) = fields {
        form = form
            .text("name", &fields.name)
            .text("animal_type", &fields.animal_type)
            .text("age", &fields.age);
    }
    let mut form = form.part(PHOTO_FIELD, part);

    let content_type = format!("multipart/form-data; boundary={}", form.boundary());
    let mut bytes = Vec::new();
    form.read_to_end(&mut bytes)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(MultipartBody {
        content_type,
        bytes,
    })
}
