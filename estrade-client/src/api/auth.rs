//! Authentication API

use crate::api::require_data;
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::User;

/// Authentication and account operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Login with email and password
    async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse>;

    /// Register a new spectator account and log it in
    async fn register(&self, req: &RegisterRequest) -> ClientResult<LoginResponse>;

    /// Get the current user for the active token
    async fn me(&self) -> ClientResult<User>;

    /// Invalidate the active token server-side
    async fn logout(&self) -> ClientResult<()>;
}

/// HTTP implementation of [`AuthApi`]
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    http: HttpClient,
}

impl HttpAuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        let resp: ApiResponse<LoginResponse> = self.http.post("api/auth/login", req).await?;
        require_data(resp, "login")
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<LoginResponse> {
        let resp: ApiResponse<LoginResponse> = self.http.post("api/auth/register", req).await?;
        require_data(resp, "registration")
    }

    async fn me(&self) -> ClientResult<User> {
        let resp: ApiResponse<User> = self.http.get("api/auth/me").await?;
        require_data(resp, "user")
    }

    async fn logout(&self) -> ClientResult<()> {
        let _: ApiResponse<()> = self.http.post_empty("api/auth/logout").await?;
        self.http.set_token(None).await;
        Ok(())
    }
}
