use crate::domain::integrations::IntegrationType;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

text_enum! {
    pub enum InsightType: "insight type" {
        Burnout => "burnout",
        Bottleneck => "bottleneck",
        Celebration => "celebration",
        General => "general",
    }
}

text_enum! {
    pub enum InsightPriority: "insight priority" {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

impl Default for InsightPriority {
    fn default() -> Self {
        InsightPriority::Medium
    }
}

text_enum! {
    pub enum InsightSource: "insight source" {
        Slack => "slack",
        Linear => "linear",
        Github => "github",
        Calendar => "calendar",
        Hr => "hr",
        System => "system",
    }
}

impl From<IntegrationType> for InsightSource {
    fn from(value: IntegrationType) -> Self {
        match value {
            IntegrationType::Slack => InsightSource::Slack,
            IntegrationType::Linear => InsightSource::Linear,
            IntegrationType::Github => InsightSource::Github,
            IntegrationType::Calendar => InsightSource::Calendar,
            IntegrationType::Hr => InsightSource::Hr,
        }
    }
}

text_enum! {
    pub enum InsightStatus: "insight status" {
        Active => "active",
        Acknowledged => "acknowledged",
        Resolved => "resolved",
        Dismissed => "dismissed",
    }
}

impl Default for InsightStatus {
    fn default() -> Self {
        InsightStatus::Active
    }
}

/// Signal payload attached to an insight. Stored as `{"kind": ..., "details": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    content = "details",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum InsightData {
    AfterHoursActivity {
        user: String,
        late_hours: u32,
        average_response_time: String,
    },
    ChannelSentiment {
        channel: String,
        sentiment: String,
        keywords: Vec<String>,
    },
    StalledProject {
        project: String,
        status: String,
        days_stuck: u32,
        assignee: String,
    },
    CompletionRate {
        current_completion_rate: String,
        previous_completion_rate: String,
        trend: String,
    },
    ReviewQueue {
        #[serde(rename = "pendingPRs")]
        pending_prs: u32,
        #[serde(rename = "oldestPR")]
        oldest_pr: String,
        repository: String,
    },
    TestCoverage {
        current_coverage: String,
        previous_coverage: String,
        trend: String,
    },
    MeetingOverrun {
        meeting_type: String,
        average_overrun: String,
        frequency: String,
    },
    DeepWork {
        current_deep_work_hours: String,
        previous_deep_work_hours: String,
        trend: String,
    },
    GrowthReadiness {
        employee: String,
        training_completed: bool,
        time_in_role: String,
    },
    Engagement {
        employee: String,
        engagement_score: String,
        previous_score: String,
        trend: String,
    },
    /// Free-form payload of manually created insights.
    Custom(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub id: String,
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub source: InsightSource,
    pub status: InsightStatus,
    pub data: Option<InsightData>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// An insight that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInsight {
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub source: InsightSource,
    pub status: InsightStatus,
    pub data: Option<InsightData>,
}

/// Analyzer output before it is tied to a team and a source.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightDraft {
    pub title: String,
    pub description: String,
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub data: InsightData,
}

impl InsightDraft {
    pub fn into_new_insight(self, team_id: &str, source: InsightSource) -> NewInsight {
        NewInsight {
            team_id: team_id.to_string(),
            title: self.title,
            description: Some(self.description),
            insight_type: self.insight_type,
            priority: self.priority,
            source,
            status: InsightStatus::Active,
            data: Some(self.data),
        }
    }
}
