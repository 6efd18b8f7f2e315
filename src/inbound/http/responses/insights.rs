use crate::domain::insights::{
    Insight, InsightData, InsightPriority, InsightSource, InsightStatus, InsightType,
};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    id: String,
    team_id: String,
    title: String,
    description: Option<String>,
    #[serde(rename = "type")]
    insight_type: InsightType,
    priority: InsightPriority,
    source: InsightSource,
    status: InsightStatus,
    data: Option<InsightData>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<Insight> for InsightResponse {
    fn from(insight: Insight) -> Self {
        Self {
            id: insight.id,
            team_id: insight.team_id,
            title: insight.title,
            description: insight.description,
            insight_type: insight.insight_type,
            priority: insight.priority,
            source: insight.source,
            status: insight.status,
            data: insight.data,
            created_at: insight.created_at,
            updated_at: insight.updated_at,
        }
    }
}
