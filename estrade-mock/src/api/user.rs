//! User profile and favorites operations

use crate::store::MockBackend;
use async_trait::async_trait;
use estrade_client::api::UserApi;
use estrade_client::error::ClientResult;
use shared::models::{User, UserUpdate};
use shared::{AppError, ErrorCode};

#[async_trait]
impl UserApi for MockBackend {
    async fn update_profile(&self, req: &UserUpdate) -> ClientResult<User> {
        self.simulate("user.update_profile").await;
        let me = self.current_user().await?;

        if req.first_name.as_deref().is_some_and(|n| n.trim().is_empty())
            || req.last_name.as_deref().is_some_and(|n| n.trim().is_empty())
        {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Names cannot be blank").into(),
            );
        }

        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == me.id)
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

        if let Some(first_name) = &req.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = &req.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(avatar_url) = &req.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }

        let updated = user.clone();
        self.persist(&state)?;
        Ok(updated)
    }

    async fn favorites(&self) -> ClientResult<Vec<i64>> {
        self.simulate("user.favorites").await;
        let me = self.current_user().await?;
        Ok(self.state.read().await.favorites_of(me.id))
    }

    async fn add_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>> {
        self.simulate("user.add_favorite").await;
        let me = self.current_user().await?;

        let mut state = self.state.write().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }

        let favorites = state.user_favorites.entry(me.id).or_default();
        if favorites.contains(&structure_id) {
            return Err(AppError::with_message(
                ErrorCode::FavoriteExists,
                format!("Structure {} is already a favorite", structure_id),
            )
            .into());
        }
        favorites.push(structure_id);

        let updated = favorites.clone();
        self.persist(&state)?;
        Ok(updated)
    }

    async fn remove_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>> {
        self.simulate("user.remove_favorite").await;
        let me = self.current_user().await?;

        let mut state = self.state.write().await;
        let favorites = state.user_favorites.entry(me.id).or_default();
        if !favorites.contains(&structure_id) {
            return Err(AppError::with_message(
                ErrorCode::FavoriteNotFound,
                format!("Structure {} is not a favorite", structure_id),
            )
            .into());
        }
        favorites.retain(|sid| *sid != structure_id);

        let updated = favorites.clone();
        self.persist(&state)?;
        Ok(updated)
    }
}
