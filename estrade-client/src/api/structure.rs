//! Structure API

use crate::api::require_data;
use crate::dto::{StructureCreatedDto, StructureDto};
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{
    Structure, StructureCreate, StructureCreated, StructureSummary, StructureType, StructureUpdate,
};
use shared::request::StructureQuery;
use shared::response::PaginatedResponse;

/// Structure directory and management operations
#[async_trait]
pub trait StructureApi: Send + Sync {
    /// List structures matching the query, paginated
    async fn list(&self, query: &StructureQuery)
    -> ClientResult<PaginatedResponse<StructureSummary>>;

    /// Fetch one structure with its areas
    async fn get(&self, id: i64) -> ClientResult<Structure>;

    /// List all structure types
    async fn types(&self) -> ClientResult<Vec<StructureType>>;

    /// Create a structure; the response may carry a re-issued token
    async fn create(&self, req: &StructureCreate) -> ClientResult<StructureCreated>;

    /// Update a structure
    async fn update(&self, id: i64, req: &StructureUpdate) -> ClientResult<Structure>;

    /// Delete a structure and everything under it
    async fn delete(&self, id: i64) -> ClientResult<()>;

    /// Upload a gallery image, returning its public URL
    async fn upload_gallery_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<String>;
}

/// HTTP implementation of [`StructureApi`]
#[derive(Debug, Clone)]
pub struct HttpStructureApi {
    http: HttpClient,
}

impl HttpStructureApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StructureApi for HttpStructureApi {
    async fn list(
        &self,
        query: &StructureQuery,
    ) -> ClientResult<PaginatedResponse<StructureSummary>> {
        let resp: ApiResponse<PaginatedResponse<StructureSummary>> =
            self.http.get_with_query("api/structures", query).await?;
        require_data(resp, "structure list")
    }

    async fn get(&self, id: i64) -> ClientResult<Structure> {
        let resp: ApiResponse<StructureDto> =
            self.http.get(&format!("api/structures/{}", id)).await?;
        require_data(resp, "structure")?.try_into()
    }

    async fn types(&self) -> ClientResult<Vec<StructureType>> {
        let resp: ApiResponse<Vec<StructureType>> = self.http.get("api/structure-types").await?;
        require_data(resp, "structure types")
    }

    async fn create(&self, req: &StructureCreate) -> ClientResult<StructureCreated> {
        let resp: ApiResponse<StructureCreatedDto> =
            self.http.post("api/structures", req).await?;
        require_data(resp, "created structure")?.try_into()
    }

    async fn update(&self, id: i64, req: &StructureUpdate) -> ClientResult<Structure> {
        let resp: ApiResponse<StructureDto> = self
            .http
            .patch(&format!("api/structures/{}", id), req)
            .await?;
        require_data(resp, "structure")?.try_into()
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self.http.delete(&format!("api/structures/{}", id)).await?;
        Ok(())
    }

    async fn upload_gallery_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<String> {
        let resp: ApiResponse<String> = self
            .http
            .upload(&format!("api/structures/{}/gallery", id), filename, bytes)
            .await?;
        require_data(resp, "gallery image URL")
    }
}
