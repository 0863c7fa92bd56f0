//! Estrade Store - reactive domain-state layer of the client
//!
//! Sits between the transport crate and the UI: caches domain data with
//! generation-guarded slots, reacts to session changes through watch
//! channels, and turns every API failure into a user-facing notification
//! plus a safe fallback value.

pub mod cache;
pub mod friends;
pub mod notify;
pub mod session;
pub mod stores;
pub mod structures;
pub mod team;
pub mod user_structure;

pub use cache::{CacheSlot, CacheStatus, KeyedCache};
pub use friends::FriendshipStore;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use session::{SessionData, SessionStore};
pub use stores::AppStores;
pub use structures::StructureStore;
pub use team::TeamStore;
pub use user_structure::{LoadState, UserStructureStore};
