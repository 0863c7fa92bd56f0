//! Team management operations

use crate::api::{require_admin, require_team_member};
use crate::store::MockBackend;
use async_trait::async_trait;
use chrono::Utc;
use estrade_client::api::TeamApi;
use estrade_client::error::ClientResult;
use shared::models::{MemberStatus, TeamInvite, TeamMember, TeamRoleUpdate, UserRole};
use shared::{AppError, AppResult, ErrorCode};

fn member_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::TeamMemberNotFound,
        format!("Team member {} not found", id),
    )
}

fn require_team_role(role: UserRole) -> AppResult<()> {
    if role.is_team_role() {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::TeamRoleInvalid,
            format!("Role {:?} cannot be assigned to a team member", role),
        ))
    }
}

#[async_trait]
impl TeamApi for MockBackend {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<TeamMember>> {
        self.simulate("team.list").await;
        let user = self.current_user().await?;
        require_team_member(&user, structure_id)?;

        let state = self.state.read().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }
        Ok(state.team_of(structure_id))
    }

    async fn invite(&self, structure_id: i64, req: &TeamInvite) -> ClientResult<Vec<TeamMember>> {
        self.simulate("team.invite").await;
        let user = self.current_user().await?;
        require_admin(&user, structure_id)?;

        if !req.email.contains('@') {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                "A valid email address is required",
            )
            .into());
        }
        require_team_role(req.role)?;

        let mut state = self.state.write().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }
        if state
            .team_members
            .iter()
            .any(|m| m.structure_id == structure_id && m.email.eq_ignore_ascii_case(req.email.trim()))
        {
            return Err(AppError::with_message(
                ErrorCode::TeamMemberExists,
                format!("{} is already on the team", req.email.trim()),
            )
            .into());
        }

        // The row stays pending with no linked account until the invitee
        // accepts out-of-band.
        let member = TeamMember {
            id: state.alloc_id(),
            structure_id,
            user_id: None,
            email: req.email.trim().to_lowercase(),
            first_name: String::new(),
            last_name: String::new(),
            role: req.role,
            status: MemberStatus::Pending,
            invited_at: Utc::now(),
            joined_at: None,
        };
        state.team_members.push(member);
        self.persist(&state)?;

        tracing::info!(structure_id, "Team invitation recorded");
        Ok(state.team_of(structure_id))
    }

    async fn update_role(
        &self,
        structure_id: i64,
        member_id: i64,
        req: &TeamRoleUpdate,
    ) -> ClientResult<Vec<TeamMember>> {
        self.simulate("team.update_role").await;
        let user = self.current_user().await?;
        require_admin(&user, structure_id)?;
        require_team_role(req.role)?;

        let mut state = self.state.write().await;
        let member = state
            .team_members
            .iter_mut()
            .find(|m| m.id == member_id && m.structure_id == structure_id)
            .ok_or_else(|| member_not_found(member_id))?;

        if member.is_user(user.id) {
            return Err(AppError::with_message(
                ErrorCode::CannotEditSelf,
                "Administrators cannot change their own role",
            )
            .into());
        }

        member.role = req.role;
        let member_user_id = member.user_id;

        // The linked account follows the member's role
        if let Some(uid) = member_user_id {
            if let Some(u) = state.users.iter_mut().find(|u| u.id == uid) {
                u.role = req.role;
            }
        }
        self.persist(&state)?;
        Ok(state.team_of(structure_id))
    }

    async fn remove(&self, structure_id: i64, member_id: i64) -> ClientResult<()> {
        self.simulate("team.remove").await;
        let user = self.current_user().await?;
        require_admin(&user, structure_id)?;

        let mut state = self.state.write().await;
        let member = state
            .team_members
            .iter()
            .find(|m| m.id == member_id && m.structure_id == structure_id)
            .ok_or_else(|| member_not_found(member_id))?;

        if member.is_user(user.id) {
            return Err(AppError::with_message(
                ErrorCode::CannotEditSelf,
                "Administrators cannot remove themselves from the team",
            )
            .into());
        }
        if member.role == UserRole::StructureAdministrator {
            return Err(AppError::with_message(
                ErrorCode::CannotRemoveAdmin,
                "Another administrator cannot be removed from the team",
            )
            .into());
        }

        // A removed member loses access to the structure entirely
        let removed_user_id = member.user_id;
        state.team_members.retain(|m| m.id != member_id);
        if let Some(uid) = removed_user_id {
            if let Some(u) = state.users.iter_mut().find(|u| u.id == uid) {
                u.structure_id = None;
                u.role = UserRole::Spectator;
            }
        }
        self.persist(&state)?;
        Ok(())
    }
}
