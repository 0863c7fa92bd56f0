//! In-process mock backend for the Estrade API
//!
//! Implements every domain API trait of `estrade-client` against in-memory
//! tables, with optional JSON-file persistence and per-operation call
//! counters. Intended for tests and offline development; plug it into the
//! client facade with [`estrade_client::ApiClient::from_backend`].

mod api;
pub mod fixtures;
pub mod state;
pub mod store;

pub use state::MockState;
pub use store::{MockBackend, RequestLog};
