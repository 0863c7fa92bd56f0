//! Mock backend storage, token handling and persistence

use crate::fixtures;
use crate::state::MockState;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use estrade_client::TokenSink;
use serde::{Deserialize, Serialize};
use shared::models::User;
use shared::{AppError, AppResult, ErrorCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-operation call counters, shared with tests
///
/// Cloning yields a handle onto the same counters.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    counts: Arc<DashMap<&'static str, u64>>,
}

impl RequestLog {
    /// Number of times the operation ran since the last reset
    pub fn count(&self, op: &str) -> u64 {
        self.counts.get(op).map(|c| *c).unwrap_or(0)
    }

    /// Total calls across all operations
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|e| *e.value()).sum()
    }

    pub fn reset(&self) {
        self.counts.clear();
    }

    pub(crate) fn record(&self, op: &'static str) {
        *self.counts.entry(op).or_insert(0) += 1;
    }
}

/// Bearer token claims, base64url JSON in the token's middle segment
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    exp: i64,
}

/// In-process backend with the same contract as the real server
///
/// All domain API traits of `estrade-client` are implemented on this type;
/// plug it in with `ApiClient::from_backend`. State lives in memory and is
/// mirrored to a JSON file after every mutation when a path is configured.
pub struct MockBackend {
    pub(crate) state: RwLock<MockState>,
    path: Option<PathBuf>,
    latency: Option<std::time::Duration>,
    token: RwLock<Option<String>>,
    log: RequestLog,
}

impl MockBackend {
    /// Seeded in-memory backend
    pub fn new() -> Self {
        Self::with_state(fixtures::seed())
    }

    /// In-memory backend over the given state
    pub fn with_state(state: MockState) -> Self {
        Self {
            state: RwLock::new(state),
            path: None,
            latency: None,
            token: RwLock::new(None),
            log: RequestLog::default(),
        }
    }

    /// Backend mirrored to a JSON file; loads the file when it exists,
    /// otherwise starts from the seeded state
    pub fn persistent(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let state = if path.exists() {
            Self::load_state(&path)?
        } else {
            fixtures::seed()
        };

        let mut backend = Self::with_state(state);
        backend.path = Some(path);
        Ok(backend)
    }

    /// Add an artificial delay before every operation
    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Call counters for this backend
    pub fn log(&self) -> &RequestLog {
        &self.log
    }

    /// Copy of the current state, for assertions
    pub async fn snapshot(&self) -> MockState {
        self.state.read().await.clone()
    }

    pub(crate) async fn simulate(&self, op: &'static str) {
        self.log.record(op);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Issue a bearer token for the user, valid for 24 hours
    pub(crate) fn issue_token(user: &User) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: (Utc::now() + Duration::hours(24)).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap_or_default());
        format!("{}.{}.mock", header, payload)
    }

    fn decode_claims(token: &str) -> AppResult<Claims> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AppError::new(ErrorCode::TokenInvalid))?;
        serde_json::from_slice(&bytes).map_err(|_| AppError::new(ErrorCode::TokenInvalid))
    }

    /// Resolve the active token to a user row
    pub(crate) async fn current_user(&self) -> AppResult<User> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or_else(AppError::not_authenticated)?;

        let claims = Self::decode_claims(&token)?;
        if claims.exp < Utc::now().timestamp() {
            return Err(AppError::new(ErrorCode::TokenExpired));
        }

        let state = self.state.read().await;
        state
            .user_by_id(claims.sub)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid))
    }

    /// Write the state to the configured file, if any
    pub(crate) fn persist(&self, state: &MockState) -> AppResult<()> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(state)
                .map_err(|e| AppError::storage(format!("Failed to serialize state: {}", e)))?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::storage(format!("Failed to create state dir: {}", e)))?;
            }
            std::fs::write(path, json)
                .map_err(|e| AppError::storage(format!("Failed to write state: {}", e)))?;
            tracing::debug!(path = %path.display(), "Mock state persisted");
        }
        Ok(())
    }

    fn load_state(path: &Path) -> AppResult<MockState> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::storage(format!("Failed to read state file: {}", e)))?;
        serde_json::from_str(&json)
            .map_err(|e| AppError::storage(format!("Failed to parse state file: {}", e)))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenSink for MockBackend {
    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_roundtrip() {
        let backend = MockBackend::new();
        let alice = backend
            .snapshot()
            .await
            .user_by_email(fixtures::ADMIN_EMAIL)
            .cloned()
            .unwrap();

        let token = MockBackend::issue_token(&alice);
        backend.set_token(Some(token)).await;

        let current = backend.current_user().await.unwrap();
        assert_eq!(current.id, alice.id);
    }

    #[tokio::test]
    async fn test_no_token_is_unauthenticated() {
        let backend = MockBackend::new();
        let err = backend.current_user().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let backend = MockBackend::new();
        backend.set_token(Some("not-a-token".to_string())).await;
        let err = backend.current_user().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let backend = MockBackend::new();

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = Claims {
            sub: fixtures::ADMIN_USER_ID,
            email: fixtures::ADMIN_EMAIL.to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        backend
            .set_token(Some(format!("{}.{}.mock", header, payload)))
            .await;

        let err = backend.current_user().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_request_log_counts() {
        let log = RequestLog::default();
        log.record("structure.list");
        log.record("structure.list");
        log.record("structure.get");
        assert_eq!(log.count("structure.list"), 2);
        assert_eq!(log.count("structure.get"), 1);
        assert_eq!(log.count("auth.me"), 0);
        assert_eq!(log.total(), 3);

        log.reset();
        assert_eq!(log.total(), 0);
    }
}
