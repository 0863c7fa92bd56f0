//! Domain API implementations over the mock state

mod area;
mod auth;
mod event;
mod friendship;
mod structure;
mod team;
mod user;

use shared::models::User;
use shared::{AppError, AppResult, ErrorCode};

/// The user must administer the structure
pub(crate) fn require_admin(user: &User, structure_id: i64) -> AppResult<()> {
    if user.structure_id == Some(structure_id) && user.role.can_manage_structure() {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::AdminRequired,
            format!(
                "Administrator rights required on structure {}",
                structure_id
            ),
        ))
    }
}

/// The user must be allowed to manage areas of the structure
pub(crate) fn require_area_manager(user: &User, structure_id: i64) -> AppResult<()> {
    if user.structure_id == Some(structure_id) && user.role.can_manage_areas() {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            format!(
                "Area management rights required on structure {}",
                structure_id
            ),
        ))
    }
}

/// The user must be allowed to manage events of the structure
pub(crate) fn require_event_manager(user: &User, structure_id: i64) -> AppResult<()> {
    if user.structure_id == Some(structure_id) && user.role.can_manage_events() {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            format!(
                "Event management rights required on structure {}",
                structure_id
            ),
        ))
    }
}

/// The user must belong to the structure's team, in any role
pub(crate) fn require_team_member(user: &User, structure_id: i64) -> AppResult<()> {
    if user.structure_id == Some(structure_id) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            format!("User is not on the team of structure {}", structure_id),
        ))
    }
}
