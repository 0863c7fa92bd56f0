//! Authentication operations

use crate::store::MockBackend;
use async_trait::async_trait;
use estrade_client::api::AuthApi;
use estrade_client::error::ClientResult;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::{User, UserRole};
use shared::{AppError, ErrorCode};

#[async_trait]
impl AuthApi for MockBackend {
    async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        self.simulate("auth.login").await;

        let state = self.state.read().await;
        let user = state
            .user_by_email(&req.email)
            .ok_or_else(AppError::invalid_credentials)?;

        let password_ok = state
            .passwords
            .get(&user.id)
            .is_some_and(|p| p == &req.password);
        if !password_ok {
            return Err(AppError::invalid_credentials().into());
        }

        Ok(LoginResponse {
            token: MockBackend::issue_token(user),
            user: user.clone(),
        })
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<LoginResponse> {
        self.simulate("auth.register").await;

        if !req.email.contains('@') {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                "A valid email address is required",
            )
            .into());
        }
        if req.password.len() < 8 {
            return Err(AppError::with_message(
                ErrorCode::ValidationFailed,
                "Password must be at least 8 characters",
            )
            .into());
        }
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "First and last name are required",
            )
            .into());
        }

        let mut state = self.state.write().await;
        if state.user_by_email(&req.email).is_some() {
            return Err(AppError::with_message(
                ErrorCode::EmailAlreadyRegistered,
                format!("Email {} is already registered", req.email),
            )
            .into());
        }

        let id = state.alloc_id();
        let user = User {
            id,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            role: UserRole::Spectator,
            structure_id: None,
            avatar_url: None,
        };
        state.users.push(user.clone());
        state.passwords.insert(id, req.password.clone());
        self.persist(&state)?;

        Ok(LoginResponse {
            token: MockBackend::issue_token(&user),
            user,
        })
    }

    async fn me(&self) -> ClientResult<User> {
        self.simulate("auth.me").await;
        Ok(self.current_user().await?)
    }

    async fn logout(&self) -> ClientResult<()> {
        self.simulate("auth.logout").await;
        // Tokens are stateless; dropping the token client-side is the logout
        Ok(())
    }
}
