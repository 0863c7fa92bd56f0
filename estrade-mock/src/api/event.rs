//! Event operations

use crate::api::require_event_manager;
use crate::store::MockBackend;
use async_trait::async_trait;
use estrade_client::api::EventApi;
use estrade_client::error::ClientResult;
use shared::models::{EventCreate, EventStatus, EventSummary};
use shared::{AppError, ErrorCode};

#[async_trait]
impl EventApi for MockBackend {
    async fn list_by_structure(&self, structure_id: i64) -> ClientResult<Vec<EventSummary>> {
        self.simulate("event.list").await;

        let state = self.state.read().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }
        Ok(state.events_of(structure_id))
    }

    async fn create(&self, structure_id: i64, req: &EventCreate) -> ClientResult<EventSummary> {
        self.simulate("event.create").await;
        let user = self.current_user().await?;
        require_event_manager(&user, structure_id)?;

        if req.name.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Event name is required").into(),
            );
        }
        if req.end_at <= req.start_at {
            return Err(AppError::new(ErrorCode::EventDatesInvalid).into());
        }

        let mut state = self.state.write().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }

        let event = EventSummary {
            id: state.alloc_id(),
            structure_id,
            name: req.name.trim().to_string(),
            start_at: req.start_at,
            end_at: req.end_at,
            status: EventStatus::Draft,
        };
        state.events.push(event.clone());
        self.persist(&state)?;

        tracing::info!(event_id = event.id, structure_id, "Event created as draft");
        Ok(event)
    }
}
