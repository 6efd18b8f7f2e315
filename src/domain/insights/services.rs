use crate::domain::insights::{
    AnalyzeParams, CreateInsightDBParams, CreateInsightServiceParams, FindInsightDBParams,
    GenerateAllResult, GenerateSourceInsightsParams, Insight, InsightAnalyzer, InsightError,
    InsightRepository, InsightService, InsightServiceParams, ListInsightsDBParams, NewInsight,
    SourceFailure, TeamInsightsParams, UpdateInsightStatusDBParams,
    UpdateInsightStatusServiceParams,
};
use crate::domain::integrations::{FindIntegrationByTypeDBParams, IntegrationRepository};
use async_trait::async_trait;
use futures::future;
use std::sync::Arc;

#[derive(Clone)]
pub struct Service<DB, REGISTRY>
where
    DB: InsightRepository,
    REGISTRY: IntegrationRepository,
{
    db: DB,
    registry: REGISTRY,
    analyzers: Arc<[Arc<dyn InsightAnalyzer>]>,
}

impl<DB, REGISTRY> Service<DB, REGISTRY>
where
    DB: InsightRepository,
    REGISTRY: IntegrationRepository,
{
    pub fn new(db: DB, registry: REGISTRY, analyzers: Arc<[Arc<dyn InsightAnalyzer>]>) -> Self {
        Self {
            db,
            registry,
            analyzers,
        }
    }

    async fn run_analyzer(
        &self,
        team_id: &str,
        analyzer: &dyn InsightAnalyzer,
    ) -> Result<Vec<Insight>, InsightError> {
        let source = analyzer.source();

        let integration = self
            .registry
            .find_integration_by_team_and_type(FindIntegrationByTypeDBParams {
                team_id: team_id.to_string(),
                integration_type: source,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %team_id,
                    source = %source,
                    "error looking up integration"
                )
            })?;

        let Some(integration) = integration.filter(|integration| integration.active) else {
            tracing::info!(team_id = %team_id, source = %source, "integration not found or inactive");
            return Ok(vec![]);
        };

        let drafts = analyzer
            .analyze(AnalyzeParams {
                team_id: team_id.to_string(),
                integration,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %team_id, source = %source, "error analyzing source")
            })?;

        let insights = future::try_join_all(drafts.into_iter().map(|draft| {
            self.db.create_insight(CreateInsightDBParams {
                insight: draft.into_new_insight(team_id, source.into()),
            })
        }))
        .await
        .inspect_err(|e| {
            tracing::error!(error = ?e, team_id = %team_id, source = %source, "error storing insights")
        })?;

        tracing::info!(
            team_id = %team_id,
            source = %source,
            count = insights.len(),
            "insights generated"
        );

        Ok(insights)
    }
}

#[async_trait]
impl<DB, REGISTRY> InsightService for Service<DB, REGISTRY>
where
    DB: InsightRepository,
    REGISTRY: IntegrationRepository,
{
    async fn create_insight(
        &self,
        params: CreateInsightServiceParams,
    ) -> Result<Insight, InsightError> {
        if params.team_id.trim().is_empty() {
            return Err(InsightError::Validation("teamId is required".to_string()));
        }
        if params.title.trim().is_empty() {
            return Err(InsightError::Validation("title must not be empty".to_string()));
        }

        let team_id = params.team_id.clone();
        let insight = self
            .db
            .create_insight(CreateInsightDBParams {
                insight: NewInsight {
                    team_id: params.team_id,
                    title: params.title.trim().to_string(),
                    description: params.description,
                    insight_type: params.insight_type,
                    priority: params.priority,
                    source: params.source,
                    status: params.status,
                    data: params.data,
                },
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %team_id, "error creating insight")
            })?;

        tracing::info!(
            insight_id = %insight.id,
            insight_type = %insight.insight_type,
            "insight created"
        );

        Ok(insight)
    }

    async fn get_insight(
        &self,
        params: InsightServiceParams,
    ) -> Result<Option<Insight>, InsightError> {
        let insight = self
            .db
            .find_insight_by_id(FindInsightDBParams {
                team_id: params.team_id,
                insight_id: params.insight_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, insight_id = %params.insight_id, "error getting insight")
            })?;

        Ok(insight)
    }

    async fn update_insight_status(
        &self,
        params: UpdateInsightStatusServiceParams,
    ) -> Result<Option<Insight>, InsightError> {
        let insight = self
            .db
            .update_insight_status(UpdateInsightStatusDBParams {
                team_id: params.team_id,
                insight_id: params.insight_id.clone(),
                status: params.status,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    insight_id = %params.insight_id,
                    status = %params.status,
                    "error updating insight status"
                )
            })?;

        if let Some(insight) = &insight {
            tracing::info!(insight_id = %insight.id, status = %insight.status, "insight status updated");
        }

        Ok(insight)
    }

    async fn delete_insight(&self, params: InsightServiceParams) -> Result<bool, InsightError> {
        let deleted = self
            .db
            .delete_insight(FindInsightDBParams {
                team_id: params.team_id,
                insight_id: params.insight_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, insight_id = %params.insight_id, "error deleting insight")
            })?;

        Ok(deleted)
    }

    async fn list_team_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<Vec<Insight>, InsightError> {
        let insights = self
            .db
            .list_insights_by_team(ListInsightsDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team insights")
            })?;

        Ok(insights)
    }

    async fn list_active_team_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<Vec<Insight>, InsightError> {
        let insights = self
            .db
            .list_active_insights_by_team(ListInsightsDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    "error getting active team insights"
                )
            })?;

        Ok(insights)
    }

    async fn generate_source_insights(
        &self,
        params: GenerateSourceInsightsParams,
    ) -> Result<Vec<Insight>, InsightError> {
        let analyzer = self
            .analyzers
            .iter()
            .find(|analyzer| analyzer.source() == params.source)
            .ok_or(InsightError::UnsupportedSource(params.source))?;

        self.run_analyzer(&params.team_id, analyzer.as_ref()).await
    }

    async fn generate_all_insights(
        &self,
        params: TeamInsightsParams,
    ) -> Result<GenerateAllResult, InsightError> {
        let team_id = params.team_id.as_str();
        let outcomes = future::join_all(self.analyzers.iter().map(|analyzer| async move {
            (
                analyzer.source(),
                self.run_analyzer(team_id, analyzer.as_ref()).await,
            )
        }))
        .await;

        let mut result = GenerateAllResult::default();
        for (source, outcome) in outcomes {
            match outcome {
                Ok(insights) => result.insights.extend(insights),
                Err(e) => {
                    tracing::warn!(error = %e, team_id = %team_id, source = %source, "source failed");
                    result.failures.push(SourceFailure {
                        source,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }
}
