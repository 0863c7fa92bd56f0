//! Shared types for the Estrade platform
//!
//! Common types used across multiple crates: domain models, error codes,
//! response envelopes and query types.

pub mod client;
pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
