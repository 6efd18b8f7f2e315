use crate::domain::insights::InsightError;
use crate::domain::pulse::{
    DigestInsights, DigestMetrics, DigestType, MetricData, PulseDigest, Scores, TeamMetric,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use time::Date;

pub const DEFAULT_DIGEST_LIMIT: u32 = 10;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PulseService: Send + Sync {
    /// Refreshes insights, records today's metric and stores a daily digest.
    async fn generate_daily_digest(
        &self,
        params: GenerateDigestParams,
    ) -> Result<PulseDigest, PulseError>;

    /// Refreshes insights and stores a digest averaging the metrics of the
    /// Sunday-start week containing the date.
    async fn generate_weekly_digest(
        &self,
        params: GenerateDigestParams,
    ) -> Result<PulseDigest, PulseError>;
    async fn get_pulse_digest(
        &self,
        params: PulseDigestParams,
    ) -> Result<Option<PulseDigest>, PulseError>;
    async fn list_team_pulse_digests(
        &self,
        params: ListTeamDigestsParams,
    ) -> Result<Vec<PulseDigest>, PulseError>;
    async fn get_latest_team_pulse_digest(
        &self,
        params: LatestDigestParams,
    ) -> Result<Option<PulseDigest>, PulseError>;
    async fn record_team_metric(
        &self,
        params: RecordTeamMetricParams,
    ) -> Result<TeamMetric, PulseError>;
    async fn list_team_metrics(
        &self,
        params: ListTeamMetricsParams,
    ) -> Result<Vec<TeamMetric>, PulseError>;
}

pub struct GenerateDigestParams {
    pub team_id: String,
    /// Defaults to today in UTC.
    pub date: Option<Date>,
}

pub struct PulseDigestParams {
    pub digest_id: String,
}

pub struct ListTeamDigestsParams {
    pub team_id: String,
    pub limit: u32,
}

pub struct LatestDigestParams {
    pub team_id: String,
    pub digest_type: DigestType,
}

pub struct RecordTeamMetricParams {
    pub team_id: String,
    pub date: Date,
    pub scores: Scores,
    pub data: Option<MetricData>,
}

pub struct ListTeamMetricsParams {
    pub team_id: String,
    pub start: Date,
    pub end: Date,
}

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("invalid pulse request: {0}")]
    Validation(String),

    #[error("failed to refresh insights: {0}")]
    Insights(#[from] InsightError),

    #[error("failed to access pulse data because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PulseRepository: Send + Sync + 'static {
    async fn create_pulse_digest(
        &self,
        params: CreatePulseDigestDBParams,
    ) -> Result<PulseDigest, DatabaseError>;
    async fn find_pulse_digest_by_id(
        &self,
        params: FindPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, DatabaseError>;

    /// Newest date first, then newest creation first.
    async fn list_pulse_digests_by_team(
        &self,
        params: ListPulseDigestsDBParams,
    ) -> Result<Vec<PulseDigest>, DatabaseError>;
    async fn find_latest_pulse_digest(
        &self,
        params: FindLatestPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, DatabaseError>;

    async fn create_team_metric(
        &self,
        params: CreateTeamMetricDBParams,
    ) -> Result<TeamMetric, DatabaseError>;

    /// Metrics dated within `[start, end]`, ascending by date.
    async fn list_team_metrics(
        &self,
        params: ListTeamMetricsDBParams,
    ) -> Result<Vec<TeamMetric>, DatabaseError>;
}

//------------------------------------------------------------------------------
// Pulse Digests
//------------------------------------------------------------------------------

pub struct CreatePulseDigestDBParams {
    pub team_id: String,
    pub date: Date,
    pub digest_type: DigestType,
    pub insights: DigestInsights,
    pub metrics: DigestMetrics,
}

pub struct FindPulseDigestDBParams {
    pub digest_id: String,
}

pub struct ListPulseDigestsDBParams {
    pub team_id: String,
    pub limit: u32,
}

pub struct FindLatestPulseDigestDBParams {
    pub team_id: String,
    pub digest_type: DigestType,
}

//------------------------------------------------------------------------------
// Team Metrics
//------------------------------------------------------------------------------

pub struct CreateTeamMetricDBParams {
    pub team_id: String,
    pub date: Date,
    pub scores: Scores,
    pub data: Option<MetricData>,
}

pub struct ListTeamMetricsDBParams {
    pub team_id: String,
    pub start: Date,
    pub end: Date,
}
