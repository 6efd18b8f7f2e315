use crate::domain::insights::{
    Insight, InsightData, InsightDraft, InsightPriority, InsightSource, InsightStatus,
    InsightType, NewInsight,
};
use crate::domain::integrations::{Integration, IntegrationType};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait InsightService: Send + Sync {
    async fn create_insight(
        &self,
        params: CreateInsightServiceParams,
    ) -> Result<Insight, InsightError>;
    async fn get_insight(
        &self,
        params: InsightServiceParams,
    ) -> Result<Option<Insight>, InsightError>;
    async fn update_insight_status(
        &self,
        params: UpdateInsightStatusServiceParams,
    ) -> Result<Option<Insight>, InsightError>;
    async fn delete_insight(&self, params: InsightServiceParams) -> Result<bool, InsightError>;
    async fn list_team_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<Vec<Insight>, InsightError>;

    /// Insights still marked active, newest first.
    async fn list_active_team_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<Vec<Insight>, InsightError>;

    /// Runs the analyzer of one source. A missing or inactive integration yields no
    /// insights and no writes.
    async fn generate_source_insights(
        &self,
        params: GenerateSourceInsightsParams,
    ) -> Result<Vec<Insight>, InsightError>;

    /// Runs every analyzer concurrently. Failing sources are reported next to the
    /// insights of the sources that succeeded.
    async fn generate_all_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<GenerateAllResult, InsightError>;
}

pub struct CreateInsightServiceParams {
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub source: InsightSource,
    pub status: InsightStatus,
    pub data: Option<InsightData>,
}

pub struct InsightServiceParams {
    pub team_id: String,
    pub insight_id: String,
}

pub struct UpdateInsightStatusServiceParams {
    pub team_id: String,
    pub insight_id: String,
    pub status: InsightStatus,
}

pub struct TeamInsightsParams {
    pub team_id: String,
}

pub struct GenerateSourceInsightsParams {
    pub team_id: String,
    pub source: IntegrationType,
}

#[derive(Debug, Default)]
pub struct GenerateAllResult {
    pub insights: Vec<Insight>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: IntegrationType,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("invalid insight: {0}")]
    Validation(String),

    #[error("no analyzer registered for {0}")]
    UnsupportedSource(IntegrationType),

    #[error(transparent)]
    Analysis(#[from] AnalyzerError),

    #[error("failed to access insights because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Analyzers
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Turns one integration's activity into insight drafts.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait InsightAnalyzer: Send + Sync {
    fn source(&self) -> IntegrationType;
    async fn analyze(&self, params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError>;
}

pub struct AnalyzeParams {
    pub team_id: String,
    pub integration: Integration,
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("source analysis failed: {0}")]
    Failed(String),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait InsightRepository: Send + Sync + 'static {
    async fn create_insight(&self, params: CreateInsightDBParams)
    -> Result<Insight, DatabaseError>;
    async fn find_insight_by_id(
        &self,
        params: FindInsightDBParams,
    ) -> Result<Option<Insight>, DatabaseError>;
    async fn update_insight_status(
        &self,
        params: UpdateInsightStatusDBParams,
    ) -> Result<Option<Insight>, DatabaseError>;
    async fn delete_insight(&self, params: FindInsightDBParams) -> Result<bool, DatabaseError>;

    /// All insights of the team in insertion order.
    async fn list_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, DatabaseError>;

    /// Active insights of the team, newest first.
    async fn list_active_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, DatabaseError>;
}

//------------------------------------------------------------------------------
// Create Insight
//------------------------------------------------------------------------------

pub struct CreateInsightDBParams {
    pub insight: NewInsight,
}

//------------------------------------------------------------------------------
// Find Insight
//------------------------------------------------------------------------------

pub struct FindInsightDBParams {
    pub team_id: String,
    pub insight_id: String,
}

pub struct ListInsightsDBParams {
    pub team_id: String,
}

//------------------------------------------------------------------------------
// Update Insight
//------------------------------------------------------------------------------

pub struct UpdateInsightStatusDBParams {
    pub team_id: String,
    pub insight_id: String,
    pub status: InsightStatus,
}
