use time::{Date, OffsetDateTime};

text_enum! {
    pub enum EventType: "event type" {
        Milestone => "milestone",
        Decision => "decision",
        Meeting => "meeting",
        Project => "project",
    }
}

/// A dated entry in a team's decision log.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub team_id: String,
    pub event_type: EventType,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
    pub tags: Vec<String>,
    pub data: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
