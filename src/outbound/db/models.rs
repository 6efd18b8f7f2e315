use crate::domain::UnknownVariant;
use crate::domain::insights::Insight;
use crate::domain::integrations::{Integration, IntegrationConfig};
use crate::domain::pulse::{PulseDigest, Scores, TeamMetric};
use crate::domain::teams::{Team, TeamMember};
use crate::domain::vault::Event;
use crate::outbound::db::error::Error;
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

fn parse_text<T>(value: &str) -> Result<T, Error>
where
    T: FromStr<Err = UnknownVariant>,
{
    T::from_str(value).map_err(|e| Error::InvalidRow(e.to_string()))
}

fn parse_json<T>(column: &str, value: serde_json::Value) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| Error::InvalidRow(format!("{column}: {e}")))
}

/// Converts every row, failing on the first one that does not decode.
pub fn decode_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, Error>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

//------------------------------------------------------------------------------
// Teams
//------------------------------------------------------------------------------

#[derive(FromRow, Clone)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<TeamRow> for Team {
    fn from(value: TeamRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            owner_id: value.owner_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct TeamMemberRow {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = Error;

    fn try_from(value: TeamMemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            user_id: value.user_id,
            role: parse_text(&value.role)?,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

//------------------------------------------------------------------------------
// Integrations
//------------------------------------------------------------------------------

#[derive(FromRow, Clone)]
pub struct IntegrationRow {
    pub id: String,
    pub team_id: String,
    #[sqlx(rename = "type")]
    pub integration_type: String,
    pub name: String,
    pub config: Option<serde_json::Value>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<IntegrationRow> for Integration {
    type Error = Error;

    fn try_from(value: IntegrationRow) -> Result<Self, Self::Error> {
        let config = value
            .config
            .filter(|config| !config.is_null())
            .map(|config| parse_json::<IntegrationConfig>("config", config))
            .transpose()?;

        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            integration_type: parse_text(&value.integration_type)?,
            name: value.name,
            config,
            active: value.active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

//------------------------------------------------------------------------------
// Insights
//------------------------------------------------------------------------------

#[derive(FromRow, Clone)]
pub struct InsightRow {
    pub id: String,
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub insight_type: String,
    pub priority: String,
    pub source: String,
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<InsightRow> for Insight {
    type Error = Error;

    fn try_from(value: InsightRow) -> Result<Self, Self::Error> {
        let data = value
            .data
            .filter(|data| !data.is_null())
            .map(|data| parse_json("data", data))
            .transpose()?;

        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            title: value.title,
            description: value.description,
            insight_type: parse_text(&value.insight_type)?,
            priority: parse_text(&value.priority)?,
            source: parse_text(&value.source)?,
            status: parse_text(&value.status)?,
            data,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

//------------------------------------------------------------------------------
// Events
//------------------------------------------------------------------------------

#[derive(FromRow, Clone)]
pub struct EventRow {
    pub id: String,
    pub team_id: String,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
    pub tags: Option<Vec<String>>,
    pub data: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<EventRow> for Event {
    type Error = Error;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            event_type: parse_text(&value.event_type)?,
            title: value.title,
            description: value.description,
            date: value.date,
            tags: value.tags.unwrap_or_default(),
            data: value.data.filter(|data| !data.is_null()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

//------------------------------------------------------------------------------
// Pulse
//------------------------------------------------------------------------------

#[derive(FromRow, Clone)]
pub struct PulseDigestRow {
    pub id: String,
    pub team_id: String,
    pub date: Date,
    #[sqlx(rename = "type")]
    pub digest_type: String,
    pub insights: Option<serde_json::Value>,
    pub metrics: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<PulseDigestRow> for PulseDigest {
    type Error = Error;

    fn try_from(value: PulseDigestRow) -> Result<Self, Self::Error> {
        let insights = match value.insights {
            Some(insights) if !insights.is_null() => parse_json("insights", insights)?,
            _ => Default::default(),
        };
        let metrics = value
            .metrics
            .ok_or_else(|| Error::InvalidRow("metrics: missing".to_string()))
            .and_then(|metrics| parse_json("metrics", metrics))?;

        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            date: value.date,
            digest_type: parse_text(&value.digest_type)?,
            insights,
            metrics,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(FromRow, Clone)]
pub struct TeamMetricRow {
    pub id: String,
    pub team_id: String,
    pub date: Date,
    pub collaboration_score: Option<i32>,
    pub productivity_score: Option<i32>,
    pub morale_score: Option<i32>,
    pub wellness_score: Option<i32>,
    pub data: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<TeamMetricRow> for TeamMetric {
    type Error = Error;

    fn try_from(value: TeamMetricRow) -> Result<Self, Self::Error> {
        let data = value
            .data
            .filter(|data| !data.is_null())
            .map(|data| parse_json("data", data))
            .transpose()?;

        Ok(Self {
            id: value.id,
            team_id: value.team_id,
            date: value.date,
            scores: Scores {
                collaboration: value.collaboration_score.unwrap_or_default(),
                productivity: value.productivity_score.unwrap_or_default(),
                morale: value.morale_score.unwrap_or_default(),
                wellness: value.wellness_score.unwrap_or_default(),
            },
            data,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
