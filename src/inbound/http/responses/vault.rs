use crate::domain::vault::{Event, EventType};
use crate::inbound::http::responses::shared::iso_date;
use serde::Serialize;
use time::{Date, OffsetDateTime};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    id: String,
    team_id: String,
    #[serde(rename = "type")]
    event_type: EventType,
    title: String,
    description: Option<String>,
    #[serde(with = "iso_date")]
    date: Date,
    tags: Vec<String>,
    data: Option<serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            team_id: event.team_id,
            event_type: event.event_type,
            title: event.title,
            description: event.description,
            date: event.date,
            tags: event.tags,
            data: event.data,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
