//! Data models
//!
//! Shared between the API client, the mock backend and the stores.
//! All IDs are `i64`.

pub mod area;
pub mod audience_zone;
pub mod event;
pub mod friendship;
pub mod structure;
pub mod structure_type;
pub mod team;
pub mod user;

// Re-exports
pub use area::*;
pub use audience_zone::*;
pub use event::*;
pub use friendship::*;
pub use structure::*;
pub use structure_type::*;
pub use team::*;
pub use user::*;
