//! Team roster of the current user's structure
//!
//! Mutations never patch the roster locally: invitations and role changes
//! replace it wholesale with the roster the server returns, and removals
//! trigger a refetch. Membership rows mix invited and joined members, so
//! the server list is the only consistent view.

use crate::cache::CacheSlot;
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::user_structure::UserStructureStore;
use estrade_client::ApiClient;
use shared::models::{TeamInvite, TeamMember, TeamRoleUpdate, UserRole};
use std::sync::Arc;

/// Roster and membership rules of the structure team
pub struct TeamStore {
    api: ApiClient,
    session: Arc<SessionStore>,
    user_structure: Arc<UserStructureStore>,
    notifier: Notifier,
    members: CacheSlot<Vec<TeamMember>>,
}

impl TeamStore {
    pub fn new(
        api: ApiClient,
        session: Arc<SessionStore>,
        user_structure: Arc<UserStructureStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            session,
            user_structure,
            notifier,
            members: CacheSlot::new(),
        }
    }

    /// Roster of the user's structure, cached until forced
    pub async fn load_team_members(&self, force: bool) -> Vec<TeamMember> {
        let Some(structure_id) = self.user_structure.user_structure_id().await else {
            return Vec::new();
        };
        match self
            .members
            .get_or_fetch(force, || self.api.team.list(structure_id))
            .await
        {
            Ok(members) => members,
            Err(e) => {
                tracing::error!(structure_id, error = %e, "Failed to load team members");
                self.notifier.error(e.user_message());
                self.members.value().await.unwrap_or_default()
            }
        }
    }

    /// Cached roster, empty until loaded
    pub async fn members(&self) -> Vec<TeamMember> {
        self.members.value().await.unwrap_or_default()
    }

    /// Whether the current user may manage the team at all
    pub async fn can_manage_team(&self) -> bool {
        self.session
            .current_user()
            .await
            .is_some_and(|u| u.role.can_manage_structure())
    }

    /// Whether the current user may change this member's role
    ///
    /// Administrators edit everyone but themselves.
    pub async fn can_edit_member(&self, member: &TeamMember) -> bool {
        let Some(me) = self.session.current_user().await else {
            return false;
        };
        me.role.can_manage_structure() && !member.is_user(me.id)
    }

    /// Whether the current user may remove this member
    ///
    /// Administrator rows are untouchable even for other administrators.
    pub async fn can_remove_member(&self, member: &TeamMember) -> bool {
        self.can_edit_member(member).await && member.role != UserRole::StructureAdministrator
    }

    /// Invite a member by email; the server returns the updated roster
    pub async fn invite_member(&self, email: &str, role: UserRole) -> bool {
        if !self.ensure_manage_permission().await {
            return false;
        }
        let Some(structure_id) = self.user_structure.user_structure_id().await else {
            self.notifier
                .error("Aucune structure n'est associée à votre compte.");
            return false;
        };
        let req = TeamInvite {
            email: email.to_string(),
            role,
        };
        match self.api.team.invite(structure_id, &req).await {
            Ok(roster) => {
                tracing::info!(structure_id, email, "Team member invited");
                self.members.set(roster).await;
                self.notifier
                    .success(format!("Invitation envoyée à {email}."));
                true
            }
            Err(e) => {
                tracing::error!(structure_id, email, error = %e, "Failed to invite team member");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Change a member's role; the server returns the updated roster
    pub async fn update_member_role(&self, member_id: i64, role: UserRole) -> bool {
        if !self.ensure_manage_permission().await {
            return false;
        }
        if let Some(member) = self.cached_member(member_id).await {
            if !self.can_edit_member(&member).await {
                self.notifier
                    .error("Vous ne pouvez pas modifier votre propre rôle.");
                return false;
            }
        }
        let Some(structure_id) = self.user_structure.user_structure_id().await else {
            self.notifier
                .error("Aucune structure n'est associée à votre compte.");
            return false;
        };
        let req = TeamRoleUpdate { role };
        match self
            .api
            .team
            .update_role(structure_id, member_id, &req)
            .await
        {
            Ok(roster) => {
                tracing::info!(structure_id, member_id, ?role, "Team member role updated");
                self.members.set(roster).await;
                self.notifier.success("Le rôle du membre a été mis à jour.");
                true
            }
            Err(e) => {
                tracing::error!(member_id, error = %e, "Failed to update team member role");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Remove a member, then refetch the roster
    ///
    /// Removal may cascade server-side (pending invitations, linked user
    /// rows), so the local list is refetched rather than patched.
    pub async fn remove_member(&self, member_id: i64) -> bool {
        if !self.ensure_manage_permission().await {
            return false;
        }
        if let Some(member) = self.cached_member(member_id).await {
            if !self.can_remove_member(&member).await {
                let message = if member.role == UserRole::StructureAdministrator {
                    "Un administrateur ne peut pas être retiré de l'équipe."
                } else {
                    "Vous ne pouvez pas vous retirer vous-même de l'équipe."
                };
                self.notifier.error(message);
                return false;
            }
        }
        let Some(structure_id) = self.user_structure.user_structure_id().await else {
            self.notifier
                .error("Aucune structure n'est associée à votre compte.");
            return false;
        };
        match self.api.team.remove(structure_id, member_id).await {
            Ok(()) => {
                tracing::info!(structure_id, member_id, "Team member removed");
                self.load_team_members(true).await;
                self.notifier.success("Le membre a été retiré de l'équipe.");
                true
            }
            Err(e) => {
                tracing::error!(member_id, error = %e, "Failed to remove team member");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Drop the cached roster
    pub async fn clear(&self) {
        self.members.clear().await;
    }

    async fn ensure_manage_permission(&self) -> bool {
        if self.can_manage_team().await {
            return true;
        }
        self.notifier
            .error("Seul l'administrateur de la structure peut gérer l'équipe.");
        false
    }

    async fn cached_member(&self, member_id: i64) -> Option<TeamMember> {
        self.members
            .value()
            .await
            .and_then(|list| list.into_iter().find(|m| m.id == member_id))
    }
}
