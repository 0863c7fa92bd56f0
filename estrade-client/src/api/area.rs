//! Area and audience zone template API

use crate::api::require_data;
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{
    AreaCreate, AreaUpdate, AudienceZoneTemplate, AudienceZoneTemplateCreate,
    AudienceZoneTemplateUpdate, StructureArea,
};

/// Area and audience zone template operations
///
/// Areas are addressed through their structure for listing and creation,
/// and directly by id for updates and deletes. Templates follow the same
/// scheme relative to their area.
#[async_trait]
pub trait AreaApi: Send + Sync {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<StructureArea>>;

    async fn create(&self, structure_id: i64, req: &AreaCreate) -> ClientResult<StructureArea>;

    async fn update(&self, area_id: i64, req: &AreaUpdate) -> ClientResult<StructureArea>;

    async fn delete(&self, area_id: i64) -> ClientResult<()>;

    async fn templates(&self, area_id: i64) -> ClientResult<Vec<AudienceZoneTemplate>>;

    async fn create_template(
        &self,
        area_id: i64,
        req: &AudienceZoneTemplateCreate,
    ) -> ClientResult<AudienceZoneTemplate>;

    async fn update_template(
        &self,
        template_id: i64,
        req: &AudienceZoneTemplateUpdate,
    ) -> ClientResult<AudienceZoneTemplate>;

    async fn delete_template(&self, template_id: i64) -> ClientResult<()>;
}

/// HTTP implementation of [`AreaApi`]
#[derive(Debug, Clone)]
pub struct HttpAreaApi {
    http: HttpClient,
}

impl HttpAreaApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AreaApi for HttpAreaApi {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<StructureArea>> {
        let resp: ApiResponse<Vec<StructureArea>> = self
            .http
            .get(&format!("api/structures/{}/areas", structure_id))
            .await?;
        require_data(resp, "area list")
    }

    async fn create(&self, structure_id: i64, req: &AreaCreate) -> ClientResult<StructureArea> {
        let resp: ApiResponse<StructureArea> = self
            .http
            .post(&format!("api/structures/{}/areas", structure_id), req)
            .await?;
        require_data(resp, "area")
    }

    async fn update(&self, area_id: i64, req: &AreaUpdate) -> ClientResult<StructureArea> {
        let resp: ApiResponse<StructureArea> =
            self.http.patch(&format!("api/areas/{}", area_id), req).await?;
        require_data(resp, "area")
    }

    async fn delete(&self, area_id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self.http.delete(&format!("api/areas/{}", area_id)).await?;
        Ok(())
    }

    async fn templates(&self, area_id: i64) -> ClientResult<Vec<AudienceZoneTemplate>> {
        let resp: ApiResponse<Vec<AudienceZoneTemplate>> = self
            .http
            .get(&format!("api/areas/{}/audience-zones", area_id))
            .await?;
        require_data(resp, "audience zone list")
    }

    async fn create_template(
        &self,
        area_id: i64,
        req: &AudienceZoneTemplateCreate,
    ) -> ClientResult<AudienceZoneTemplate> {
        let resp: ApiResponse<AudienceZoneTemplate> = self
            .http
            .post(&format!("api/areas/{}/audience-zones", area_id), req)
            .await?;
        require_data(resp, "audience zone")
    }

    async fn update_template(
        &self,
        template_id: i64,
        req: &AudienceZoneTemplateUpdate,
    ) -> ClientResult<AudienceZoneTemplate> {
        let resp: ApiResponse<AudienceZoneTemplate> = self
            .http
            .patch(&format!("api/audience-zones/{}", template_id), req)
            .await?;
        require_data(resp, "audience zone")
    }

    async fn delete_template(&self, template_id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self
            .http
            .delete(&format!("api/audience-zones/{}", template_id))
            .await?;
        Ok(())
    }
}
