//! Team management API

use crate::api::require_data;
use crate::convert::convert_vec;
use crate::dto::TeamMemberDto;
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{TeamInvite, TeamMember, TeamRoleUpdate};

/// Team management operations
///
/// Invite and role changes return the full refreshed roster so callers can
/// replace their local copy in one step. Removal returns nothing.
#[async_trait]
pub trait TeamApi: Send + Sync {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<TeamMember>>;

    async fn invite(&self, structure_id: i64, req: &TeamInvite) -> ClientResult<Vec<TeamMember>>;

    async fn update_role(
        &self,
        structure_id: i64,
        member_id: i64,
        req: &TeamRoleUpdate,
    ) -> ClientResult<Vec<TeamMember>>;

    async fn remove(&self, structure_id: i64, member_id: i64) -> ClientResult<()>;
}

/// HTTP implementation of [`TeamApi`]
#[derive(Debug, Clone)]
pub struct HttpTeamApi {
    http: HttpClient,
}

impl HttpTeamApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TeamApi for HttpTeamApi {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<TeamMember>> {
        let resp: ApiResponse<Vec<TeamMemberDto>> = self
            .http
            .get(&format!("api/structures/{}/team", structure_id))
            .await?;
        convert_vec(require_data(resp, "team list")?)
    }

    async fn invite(&self, structure_id: i64, req: &TeamInvite) -> ClientResult<Vec<TeamMember>> {
        let resp: ApiResponse<Vec<TeamMemberDto>> = self
            .http
            .post(&format!("api/structures/{}/team/invite", structure_id), req)
            .await?;
        convert_vec(require_data(resp, "team list")?)
    }

    async fn update_role(
        &self,
        structure_id: i64,
        member_id: i64,
        req: &TeamRoleUpdate,
    ) -> ClientResult<Vec<TeamMember>> {
        let resp: ApiResponse<Vec<TeamMemberDto>> = self
            .http
            .patch(
                &format!("api/structures/{}/team/{}", structure_id, member_id),
                req,
            )
            .await?;
        convert_vec(require_data(resp, "team list")?)
    }

    async fn remove(&self, structure_id: i64, member_id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self
            .http
            .delete(&format!("api/structures/{}/team/{}", structure_id, member_id))
            .await?;
        Ok(())
    }
}
