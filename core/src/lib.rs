//! Client core for the Pet Friends pet-management service.
//!
//! # Overview
//! Builds `HttpRequest` values and decodes `HttpResponse` values without
//! touching the network (host-does-IO pattern). `PetFriends` glues that core
//! to a `Transport` so test code can call one method per service operation
//! and get back `(status, body)`.
//!
//! # Design
//! - `PetFriendsClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse`
//!   (consumes response), so the I/O boundary is explicit.
//! - Status codes are never interpreted: the contract tests do that.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::PetFriendsClient;
pub use config::Settings;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{ApiResponse, ResponseBody};
pub use transport::{Transport, UreqTransport};
pub use types::{AuthKey, Credentials, Pet, PetFields, PetFilter, PetList, Photo};
