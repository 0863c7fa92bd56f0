//! Estrade Client - HTTP client for the Estrade API
//!
//! Provides the transport layer of the platform: per-domain API traits, the
//! HTTP implementations behind them, and the wire DTO boundary that converts
//! raw payloads into typed domain models.

pub mod api;
pub mod config;
pub mod convert;
pub mod dto;
pub mod error;
pub mod http;

pub use api::{
    ApiClient, AreaApi, AuthApi, EventApi, FriendshipApi, StructureApi, TeamApi, TokenSink,
    UserApi,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest};
