//! Domain API traits and the client facade

mod area;
mod auth;
mod event;
mod friendship;
mod structure;
mod team;
mod user;

pub use area::{AreaApi, HttpAreaApi};
pub use auth::{AuthApi, HttpAuthApi};
pub use event::{EventApi, HttpEventApi};
pub use friendship::{FriendshipApi, HttpFriendshipApi};
pub use structure::{HttpStructureApi, StructureApi};
pub use team::{HttpTeamApi, TeamApi};
pub use user::{HttpUserApi, UserApi};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use std::sync::Arc;

/// Extract the payload of a response, treating a missing body as an error
pub(crate) fn require_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
}

/// Receiver of bearer token changes
///
/// Implemented by the HTTP transport and by in-process backends that need
/// to know the caller's token.
#[async_trait]
pub trait TokenSink: Send + Sync {
    async fn set_token(&self, token: Option<String>);
}

/// Unified entry point over every domain API
///
/// Backed either by HTTP calls against the real server or by any other
/// backend implementing the domain traits, such as an in-memory mock.
#[derive(Clone)]
pub struct ApiClient {
    pub auth: Arc<dyn AuthApi>,
    pub structures: Arc<dyn StructureApi>,
    pub areas: Arc<dyn AreaApi>,
    pub events: Arc<dyn EventApi>,
    pub team: Arc<dyn TeamApi>,
    pub friends: Arc<dyn FriendshipApi>,
    pub users: Arc<dyn UserApi>,
    token_sink: Arc<dyn TokenSink>,
}

impl ApiClient {
    /// Build a client that talks to the real server over HTTP
    pub fn http(config: &ClientConfig) -> Self {
        let http = config.build_http_client();
        Self {
            auth: Arc::new(HttpAuthApi::new(http.clone())),
            structures: Arc::new(HttpStructureApi::new(http.clone())),
            areas: Arc::new(HttpAreaApi::new(http.clone())),
            events: Arc::new(HttpEventApi::new(http.clone())),
            team: Arc::new(HttpTeamApi::new(http.clone())),
            friends: Arc::new(HttpFriendshipApi::new(http.clone())),
            users: Arc::new(HttpUserApi::new(http.clone())),
            token_sink: Arc::new(http),
        }
    }

    /// Build a client over a single backend implementing every domain API
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: AuthApi
            + StructureApi
            + AreaApi
            + EventApi
            + TeamApi
            + FriendshipApi
            + UserApi
            + TokenSink
            + 'static,
    {
        Self {
            auth: backend.clone(),
            structures: backend.clone(),
            areas: backend.clone(),
            events: backend.clone(),
            team: backend.clone(),
            friends: backend.clone(),
            users: backend.clone(),
            token_sink: backend,
        }
    }

    /// Propagate the bearer token to the backend; `None` clears it
    pub async fn set_token(&self, token: Option<String>) {
        self.token_sink.set_token(token).await;
    }
}
