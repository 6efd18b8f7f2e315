use crate::domain::pulse::{
    DigestInsights, DigestMetrics, DigestType, MetricData, PulseDigest, Scores, TeamMetric,
};
use crate::inbound::http::responses::shared::iso_date;
use serde::Serialize;
use time::{Date, OffsetDateTime};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseDigestBody {
    id: String,
    team_id: String,
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(rename = "type")]
    digest_type: DigestType,
    insights: DigestInsights,
    metrics: DigestMetrics,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<PulseDigest> for PulseDigestBody {
    fn from(digest: PulseDigest) -> Self {
        Self {
            id: digest.id,
            team_id: digest.team_id,
            date: digest.date,
            digest_type: digest.digest_type,
            insights: digest.insights,
            metrics: digest.metrics,
            created_at: digest.created_at,
            updated_at: digest.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PulseDigestResponse {
    digest: PulseDigestBody,
}

impl From<PulseDigest> for PulseDigestResponse {
    fn from(digest: PulseDigest) -> Self {
        Self {
            digest: digest.into(),
        }
    }
}

#[derive(Serialize)]
pub struct PulseDigestsResponse {
    digests: Vec<PulseDigestBody>,
}

impl From<Vec<PulseDigest>> for PulseDigestsResponse {
    fn from(digests: Vec<PulseDigest>) -> Self {
        Self {
            digests: digests.into_iter().map(PulseDigestBody::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetricResponse {
    id: String,
    team_id: String,
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(flatten)]
    scores: Scores,
    data: Option<MetricData>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<TeamMetric> for TeamMetricResponse {
    fn from(metric: TeamMetric) -> Self {
        Self {
            id: metric.id,
            team_id: metric.team_id,
            date: metric.date,
            scores: metric.scores,
            data: metric.data,
            created_at: metric.created_at,
            updated_at: metric.updated_at,
        }
    }
}
