use crate::domain::vault::{Event, EventType};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use time::Date;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait VaultService: Send + Sync {
    async fn create_event(&self, params: CreateEventServiceParams) -> Result<Event, VaultError>;
    async fn get_event(&self, params: EventServiceParams) -> Result<Option<Event>, VaultError>;

    /// Newest event date first, optionally narrowed to one event type.
    async fn list_team_events(
        &self,
        params: ListTeamEventsParams,
    ) -> Result<Vec<Event>, VaultError>;
    async fn delete_event(&self, params: EventServiceParams) -> Result<bool, VaultError>;
}

pub struct CreateEventServiceParams {
    pub team_id: String,
    pub event_type: EventType,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
    pub tags: Vec<String>,
    pub data: Option<serde_json::Value>,
}

pub struct EventServiceParams {
    pub team_id: String,
    pub event_id: String,
}

pub struct ListTeamEventsParams {
    pub team_id: String,
    pub event_type: Option<EventType>,
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("invalid event: {0}")]
    Validation(String),

    #[error("failed to access events because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EventRepository: Send + Sync + 'static {
    async fn create_event(&self, params: CreateEventDBParams) -> Result<Event, DatabaseError>;
    async fn find_event_by_id(
        &self,
        params: FindEventDBParams,
    ) -> Result<Option<Event>, DatabaseError>;
    async fn list_events_by_team(
        &self,
        params: ListEventsDBParams,
    ) -> Result<Vec<Event>, DatabaseError>;
    async fn delete_event(&self, params: FindEventDBParams) -> Result<bool, DatabaseError>;
}

pub struct CreateEventDBParams {
    pub team_id: String,
    pub event_type: EventType,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
    pub tags: Vec<String>,
    pub data: Option<serde_json::Value>,
}

pub struct FindEventDBParams {
    pub team_id: String,
    pub event_id: String,
}

pub struct ListEventsDBParams {
    pub team_id: String,
    pub event_type: Option<EventType>,
}
