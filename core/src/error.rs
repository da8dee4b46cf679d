//! Error types for the Pet Friends client.
//!
//! # Design
//! Non-2xx responses are not errors here: every operation hands the status
//! code back to the caller untouched. `ApiError` only covers what prevents a
//! response from existing (transport failure, unreadable photo file, request
//! encoding) or what prevents a body from being read as the requested type.

use std::path::PathBuf;

/// Errors returned by the client, its transport and response accessors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A photo file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The response body has no field with this name.
    #[error("response body has no `{0}` field")]
    MissingField(&'static str),
}

/// Errors raised while loading `Settings`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Live runs need a real account.
    #[error("valid_email and valid_password must be set (config file or PETFRIENDS_EMAIL / PETFRIENDS_PASSWORD)")]
    MissingCredentials,
}
