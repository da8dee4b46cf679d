//! Input rules the service should enforce. Only `Mode::Strict` applies them
//! to pet fields; image sniffing is used in both modes.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ServiceError;

/// Names and animal types are words: letters and digits with spaces,
/// hyphens or apostrophes between them, and at least one letter.
/// `"Mordo4ka"` is a name, `"911"` and `"K$t!"` are not.
pub fn check_label(field: &str, value: &str) -> Result<(), ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::bad_request(format!("{field} is required")));
    }
    if !value.chars().any(char::is_alphabetic) {
        return Err(ServiceError::bad_request(format!("{field} must contain letters")));
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '\''))
    {
        return Err(ServiceError::bad_request(format!("{field} contains symbols")));
    }
    Ok(())
}

/// Ages are non-negative whole numbers.
pub fn check_age(value: &str) -> Result<(), ServiceError> {
    value
        .trim()
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| ServiceError::bad_request("age must be a non-negative whole number"))
}

/// Mime type from magic bytes, for the formats the service stores.
pub fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(PNG) {
        Some("image/png")
    } else {
        None
    }
}

/// `data:` URI the service returns in `pet_photo`, or `None` for non-images.
pub fn photo_data_uri(bytes: &[u8]) -> Option<String> {
    let mime = sniff_image(bytes)?;
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
