//! Event API

use crate::api::require_data;
use crate::convert::convert_vec;
use crate::dto::EventSummaryDto;
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{EventCreate, EventSummary};

/// Event operations scoped to a structure
#[async_trait]
pub trait EventApi: Send + Sync {
    /// List the events of a structure
    async fn list_by_structure(&self, structure_id: i64) -> ClientResult<Vec<EventSummary>>;

    /// Create a draft event under a structure
    async fn create(&self, structure_id: i64, req: &EventCreate) -> ClientResult<EventSummary>;
}

/// HTTP implementation of [`EventApi`]
#[derive(Debug, Clone)]
pub struct HttpEventApi {
    http: HttpClient,
}

impl HttpEventApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EventApi for HttpEventApi {
    async fn list_by_structure(&self, structure_id: i64) -> ClientResult<Vec<EventSummary>> {
        let resp: ApiResponse<Vec<EventSummaryDto>> = self
            .http
            .get(&format!("api/structures/{}/events", structure_id))
            .await?;
        convert_vec(require_data(resp, "event list")?)
    }

    async fn create(&self, structure_id: i64, req: &EventCreate) -> ClientResult<EventSummary> {
        let resp: ApiResponse<EventSummaryDto> = self
            .http
            .post(&format!("api/structures/{}/events", structure_id), req)
            .await?;
        require_data(resp, "event")?.try_into()
    }
}
