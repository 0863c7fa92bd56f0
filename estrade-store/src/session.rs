//! Session state: auth token, current user, persistence
//!
//! The session is the single source of truth for "who is logged in". It
//! pushes the bearer token into the API client, mirrors itself to a JSON
//! file when a data directory is configured, and publishes the current
//! user through a watch channel that reactive stores consume.

use crate::notify::Notifier;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use estrade_client::{ApiClient, ClientError, ClientResult, LoginRequest, RegisterRequest};
use serde::{Deserialize, Serialize};
use shared::models::{User, UserUpdate};
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::{RwLock, watch};

/// File the session is mirrored to under the data directory
const SESSION_FILE: &str = "session.json";

/// Persisted session document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: User,
    pub logged_in_at: DateTime<Utc>,
}

/// Failure to read or write the session file
#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Expiry claim of a JWT-shaped token, read without verification
///
/// `None` for tokens that are not three dot-separated segments with a
/// base64url JSON payload carrying a numeric `exp`.
pub(crate) fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

/// Authentication state of the app
pub struct SessionStore {
    api: ApiClient,
    notifier: Notifier,
    path: Option<PathBuf>,
    session: RwLock<Option<SessionData>>,
    user_tx: watch::Sender<Option<User>>,
}

impl SessionStore {
    pub fn new(api: ApiClient, notifier: Notifier, data_dir: Option<PathBuf>) -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            api,
            notifier,
            path: data_dir.map(|dir| dir.join(SESSION_FILE)),
            session: RwLock::new(None),
            user_tx,
        }
    }

    /// Current user, if logged in
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Active bearer token, if logged in
    pub async fn token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Channel carrying the authenticated user; `None` when logged out
    pub fn watch_user(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    /// Log in and persist the session
    ///
    /// The error is returned so login forms can react to the exact cause;
    /// a notification is pushed either way.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.auth.login(&req).await {
            Ok(resp) => {
                tracing::info!(user_id = resp.user.id, "Logged in");
                self.apply_session(resp.token, resp.user.clone()).await;
                self.notifier
                    .success(format!("Bienvenue, {} !", resp.user.first_name));
                Ok(resp.user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                let message = match &e {
                    ClientError::Unauthorized => "Email ou mot de passe incorrect.",
                    other => other.user_message(),
                };
                self.notifier.error(message);
                Err(e)
            }
        }
    }

    /// Create a spectator account and log it in
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<User> {
        match self.api.auth.register(req).await {
            Ok(resp) => {
                tracing::info!(user_id = resp.user.id, "Account created");
                self.apply_session(resp.token, resp.user.clone()).await;
                self.notifier.success("Votre compte a été créé.");
                Ok(resp.user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Log out, clearing the session everywhere
    ///
    /// The server call is best-effort; local state is cleared even when it
    /// fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.auth.logout().await {
            tracing::debug!(error = %e, "Server-side logout failed");
        }
        self.api.set_token(None).await;
        *self.session.write().await = None;
        self.clear_disk();
        self.user_tx.send_replace(None);
        self.notifier.info("Vous êtes déconnecté.");
        tracing::info!("Logged out");
    }

    /// Re-fetch the current user from the server and sync the session
    pub async fn refresh_current_user(&self) -> Option<User> {
        if !self.is_logged_in().await {
            return None;
        }
        match self.api.auth.me().await {
            Ok(user) => {
                let data = self.patch_session(|d| d.user = user.clone()).await?;
                self.save_disk(&data);
                self.user_tx.send_replace(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Current-user refresh failed");
                None
            }
        }
    }

    /// Swap in a re-issued token, then refresh the user it now describes
    ///
    /// Used after structure creation, where the server grants the creator
    /// administrator rights through a new token.
    pub async fn apply_token(&self, token: String) -> Option<User> {
        self.api.set_token(Some(token.clone())).await;
        if let Some(data) = self.patch_session(|d| d.token = token).await {
            self.save_disk(&data);
        }
        self.refresh_current_user().await
    }

    /// Update the profile of the current user and sync the session copy
    pub async fn update_profile(&self, update: &UserUpdate) -> Option<User> {
        match self.api.users.update_profile(update).await {
            Ok(user) => {
                if let Some(data) = self.patch_session(|d| d.user = user.clone()).await {
                    self.save_disk(&data);
                }
                self.user_tx.send_replace(Some(user.clone()));
                self.notifier.success("Votre profil a été mis à jour.");
                Some(user)
            }
            Err(e) => {
                tracing::error!(error = %e, "Profile update failed");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Restore a persisted session at startup
    ///
    /// Expired tokens are dropped along with their file; unreadable files
    /// are ignored. Returns the restored user, if any.
    pub async fn restore(&self) -> Option<User> {
        let data = match self.load_disk() {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable session file, starting logged out");
                return None;
            }
        };

        if let Some(expiry) = jwt_expiry(&data.token) {
            if expiry <= Utc::now() {
                tracing::info!(user_id = data.user.id, "Persisted session expired");
                self.clear_disk();
                return None;
            }
        }

        tracing::info!(user_id = data.user.id, "Session restored");
        let user = data.user.clone();
        self.api.set_token(Some(data.token.clone())).await;
        *self.session.write().await = Some(data);
        self.user_tx.send_replace(Some(user.clone()));
        Some(user)
    }

    async fn apply_session(&self, token: String, user: User) {
        self.api.set_token(Some(token.clone())).await;
        let data = SessionData {
            token,
            user: user.clone(),
            logged_in_at: Utc::now(),
        };
        self.save_disk(&data);
        *self.session.write().await = Some(data);
        self.user_tx.send_replace(Some(user));
    }

    /// Patch the in-memory session, returning the patched copy
    async fn patch_session<F>(&self, patch: F) -> Option<SessionData>
    where
        F: FnOnce(&mut SessionData),
    {
        let mut session = self.session.write().await;
        session.as_mut().map(|data| {
            patch(data);
            data.clone()
        })
    }

    fn load_disk(&self) -> Result<Option<SessionData>, SessionFileError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save_disk(&self, data: &SessionData) {
        if let Err(e) = self.try_save(data) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }

    fn try_save(&self, data: &SessionData) -> Result<(), SessionFileError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }

    fn clear_disk(&self) {
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!(error = %e, "Failed to remove session file");
                }
            }
        }
    }
}
