use crate::domain::insights::{Insight, InsightService, TeamInsightsParams};
use crate::domain::pulse::{
    CreatePulseDigestDBParams, CreateTeamMetricDBParams, DAILY_HIGHLIGHTS, DailyMetrics,
    DigestInsights, DigestMetrics, DigestType, FindLatestPulseDigestDBParams,
    FindPulseDigestDBParams, GenerateDigestParams, LatestDigestParams, ListPulseDigestsDBParams,
    ListTeamDigestsParams, ListTeamMetricsDBParams, ListTeamMetricsParams, MetricData,
    MetricTrends, PulseDigest, PulseDigestParams, PulseError, PulseRepository, PulseService,
    RecordTeamMetricParams, Scores, TeamMetric, WeeklyMetrics, week_bounds,
};
use async_trait::async_trait;
use rand::Rng;
use time::{Date, OffsetDateTime};

#[derive(Clone)]
pub struct Service<DB, INSIGHTS>
where
    DB: PulseRepository,
    INSIGHTS: InsightService,
{
    db: DB,
    insights: INSIGHTS,
}

impl<DB, INSIGHTS> Service<DB, INSIGHTS>
where
    DB: PulseRepository,
    INSIGHTS: InsightService,
{
    pub fn new(db: DB, insights: INSIGHTS) -> Self {
        Self { db, insights }
    }

    /// Generates fresh insights and returns the team's active ones. Failing sources are
    /// logged and skipped.
    async fn refresh_insights(&self, team_id: &str) -> Result<Vec<Insight>, PulseError> {
        let generated = self
            .insights
            .generate_all_insights(TeamInsightsParams {
                team_id: team_id.to_string(),
            })
            .await?;

        for failure in &generated.failures {
            tracing::warn!(
                team_id = %team_id,
                source = %failure.source,
                error = %failure.error,
                "insight source failed during digest generation"
            );
        }

        let active = self
            .insights
            .list_active_team_insights(TeamInsightsParams {
                team_id: team_id.to_string(),
            })
            .await?;

        Ok(active)
    }

    async fn store_digest(
        &self,
        team_id: String,
        date: Date,
        digest_type: DigestType,
        insights: DigestInsights,
        metrics: DigestMetrics,
    ) -> Result<PulseDigest, PulseError> {
        let digest = self
            .db
            .create_pulse_digest(CreatePulseDigestDBParams {
                team_id,
                date,
                digest_type,
                insights,
                metrics,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, digest_type = %digest_type, "error creating pulse digest")
            })?;

        tracing::info!(
            digest_id = %digest.id,
            team_id = %digest.team_id,
            digest_type = %digest.digest_type,
            "pulse digest created"
        );

        Ok(digest)
    }
}

fn sample_scores() -> Scores {
    let mut rng = rand::rng();

    Scores {
        collaboration: rng.random_range(70..100),
        productivity: rng.random_range(70..100),
        morale: rng.random_range(70..100),
        wellness: rng.random_range(70..100),
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[async_trait]
impl<DB, INSIGHTS> PulseService for Service<DB, INSIGHTS>
where
    DB: PulseRepository,
    INSIGHTS: InsightService,
{
    async fn generate_daily_digest(
        &self,
        params: GenerateDigestParams,
    ) -> Result<PulseDigest, PulseError> {
        let date = params.date.unwrap_or_else(today);
        let insights = self.refresh_insights(&params.team_id).await?;

        let metric = self
            .db
            .create_team_metric(CreateTeamMetricDBParams {
                team_id: params.team_id.clone(),
                date,
                scores: sample_scores(),
                data: Some(MetricData {
                    trends: MetricTrends::DAILY,
                    highlights: DAILY_HIGHLIGHTS.map(String::from).to_vec(),
                }),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error recording team metric")
            })?;

        let (trends, highlights) = match metric.data {
            Some(data) => (data.trends, data.highlights),
            None => (MetricTrends::DAILY, vec![]),
        };

        self.store_digest(
            params.team_id,
            date,
            DigestType::Daily,
            DigestInsights::from_insights(&insights),
            DigestMetrics::Daily(DailyMetrics {
                scores: metric.scores,
                trends,
                highlights,
            }),
        )
        .await
    }

    async fn generate_weekly_digest(
        &self,
        params: GenerateDigestParams,
    ) -> Result<PulseDigest, PulseError> {
        let date = params.date.unwrap_or_else(today);
        let insights = self.refresh_insights(&params.team_id).await?;

        let (start, end) = week_bounds(date);
        let metrics = self
            .db
            .list_team_metrics(ListTeamMetricsDBParams {
                team_id: params.team_id.clone(),
                start,
                end,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting weekly metrics")
            })?;

        tracing::debug!(
            team_id = %params.team_id,
            %start,
            %end,
            count = metrics.len(),
            "averaging weekly metrics"
        );

        self.store_digest(
            params.team_id,
            date,
            DigestType::Weekly,
            DigestInsights::from_insights(&insights),
            DigestMetrics::Weekly(WeeklyMetrics::from_averages(Scores::average(&metrics))),
        )
        .await
    }

    async fn get_pulse_digest(
        &self,
        params: PulseDigestParams,
    ) -> Result<Option<PulseDigest>, PulseError> {
        let digest = self
            .db
            .find_pulse_digest_by_id(FindPulseDigestDBParams {
                digest_id: params.digest_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, digest_id = %params.digest_id, "error getting pulse digest")
            })?;

        Ok(digest)
    }

    async fn list_team_pulse_digests(
        &self,
        params: ListTeamDigestsParams,
    ) -> Result<Vec<PulseDigest>, PulseError> {
        if params.limit == 0 {
            return Ok(vec![]);
        }

        let digests = self
            .db
            .list_pulse_digests_by_team(ListPulseDigestsDBParams {
                team_id: params.team_id.clone(),
                limit: params.limit,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team pulse digests")
            })?;

        Ok(digests)
    }

    async fn get_latest_team_pulse_digest(
        &self,
        params: LatestDigestParams,
    ) -> Result<Option<PulseDigest>, PulseError> {
        let digest = self
            .db
            .find_latest_pulse_digest(FindLatestPulseDigestDBParams {
                team_id: params.team_id.clone(),
                digest_type: params.digest_type,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    digest_type = %params.digest_type,
                    "error getting latest team pulse digest"
                )
            })?;

        Ok(digest)
    }

    async fn record_team_metric(
        &self,
        params: RecordTeamMetricParams,
    ) -> Result<TeamMetric, PulseError> {
        params.scores.validate().map_err(PulseError::Validation)?;

        let metric = self
            .db
            .create_team_metric(CreateTeamMetricDBParams {
                team_id: params.team_id.clone(),
                date: params.date,
                scores: params.scores,
                data: params.data,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error recording team metric")
            })?;

        tracing::info!(metric_id = %metric.id, date = %metric.date, "team metric recorded");

        Ok(metric)
    }

    async fn list_team_metrics(
        &self,
        params: ListTeamMetricsParams,
    ) -> Result<Vec<TeamMetric>, PulseError> {
        if params.start > params.end {
            return Err(PulseError::Validation(
                "start must not be after end".to_string(),
            ));
        }

        let metrics = self
            .db
            .list_team_metrics(ListTeamMetricsDBParams {
                team_id: params.team_id.clone(),
                start: params.start,
                end: params.end,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team metrics")
            })?;

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::{
        GenerateAllResult, InsightError, InsightPriority, InsightSource, InsightStatus,
        InsightType, MockInsightService, SourceFailure,
    };
    use crate::domain::integrations::IntegrationType;
    use crate::domain::pulse::{MockPulseRepository, Standing};
    use std::future;
    use time::macros::date;

    fn insight(id: &str, priority: InsightPriority) -> Insight {
        Insight {
            id: id.to_string(),
            team_id: "team_1".to_string(),
            title: id.to_string(),
            description: None,
            insight_type: InsightType::General,
            priority,
            source: InsightSource::Slack,
            status: InsightStatus::Active,
            data: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn metric(params: CreateTeamMetricDBParams) -> TeamMetric {
        TeamMetric {
            id: "tmet_1".to_string(),
            team_id: params.team_id,
            date: params.date,
            scores: params.scores,
            data: params.data,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn metric_with(day: Date, value: i32) -> TeamMetric {
        metric(CreateTeamMetricDBParams {
            team_id: "team_1".to_string(),
            date: day,
            scores: Scores {
                collaboration: value,
                productivity: value,
                morale: value,
                wellness: value,
            },
            data: None,
        })
    }

    fn digest(params: CreatePulseDigestDBParams) -> PulseDigest {
        PulseDigest {
            id: "plse_1".to_string(),
            team_id: params.team_id,
            date: params.date,
            digest_type: params.digest_type,
            insights: params.insights,
            metrics: params.metrics,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn insight_service(active: Vec<Insight>, failures: Vec<SourceFailure>) -> MockInsightService {
        let mut insights = MockInsightService::new();
        insights
            .expect_generate_all_insights()
            .times(1)
            .returning(move |_| {
                Box::pin(future::ready(Ok(GenerateAllResult {
                    insights: vec![],
                    failures: failures.clone(),
                })))
            });
        insights
            .expect_list_active_team_insights()
            .times(1)
            .returning(move |_| Box::pin(future::ready(Ok(active.clone()))));
        insights
    }

    #[tokio::test]
    async fn test_generate_daily_digest() {
        let insights = insight_service(
            vec![
                insight("inst_1", InsightPriority::High),
                insight("inst_2", InsightPriority::Medium),
                insight("inst_3", InsightPriority::High),
            ],
            vec![SourceFailure {
                source: IntegrationType::Github,
                error: "boom".to_string(),
            }],
        );

        let mut db = MockPulseRepository::new();
        db.expect_create_team_metric()
            .times(1)
            .withf(|params| {
                let scores = [
                    params.scores.collaboration,
                    params.scores.productivity,
                    params.scores.morale,
                    params.scores.wellness,
                ];
                params.date == date!(2024 - 05 - 15)
                    && scores.iter().all(|s| (70..100).contains(s))
            })
            .returning(|params| Box::pin(future::ready(Ok(metric(params)))));
        db.expect_create_pulse_digest()
            .times(1)
            .returning(|params| Box::pin(future::ready(Ok(digest(params)))));

        let service = Service::new(db, insights);
        let result = service
            .generate_daily_digest(GenerateDigestParams {
                team_id: "team_1".to_string(),
                date: Some(date!(2024 - 05 - 15)),
            })
            .await
            .unwrap();

        assert_eq!(DigestType::Daily, result.digest_type);
        assert_eq!(vec!["inst_1", "inst_3"], result.insights.high);
        assert_eq!(vec!["inst_2"], result.insights.medium);
        assert!(result.insights.low.is_empty());

        let DigestMetrics::Daily(metrics) = result.metrics else {
            panic!("expected daily metrics");
        };
        assert_eq!(MetricTrends::DAILY, metrics.trends);
        assert_eq!(3, metrics.highlights.len());
    }

    #[tokio::test]
    async fn test_generate_weekly_digest_averages_week() {
        let mut db = MockPulseRepository::new();
        db.expect_list_team_metrics()
            .times(1)
            .withf(|params| {
                params.start == date!(2024 - 05 - 12) && params.end == date!(2024 - 05 - 18)
            })
            .returning(|_| {
                Box::pin(future::ready(Ok(vec![
                    metric_with(date!(2024 - 05 - 13), 70),
                    metric_with(date!(2024 - 05 - 14), 90),
                ])))
            });
        db.expect_create_pulse_digest()
            .times(1)
            .returning(|params| Box::pin(future::ready(Ok(digest(params)))));

        let service = Service::new(db, insight_service(vec![], vec![]));
        let result = service
            .generate_weekly_digest(GenerateDigestParams {
                team_id: "team_1".to_string(),
                date: Some(date!(2024 - 05 - 15)),
            })
            .await
            .unwrap();

        let DigestMetrics::Weekly(metrics) = result.metrics else {
            panic!("expected weekly metrics");
        };
        assert_eq!(80, metrics.scores.collaboration);
        assert_eq!(Standing::NeedsImprovement, metrics.weekly_trends.collaboration);
        assert_eq!(3, metrics.key_accomplishments.len());
        assert_eq!(3, metrics.areas_for_improvement.len());
    }

    #[tokio::test]
    async fn test_generate_weekly_digest_without_metrics() {
        let mut db = MockPulseRepository::new();
        db.expect_list_team_metrics()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![]))));
        db.expect_create_pulse_digest()
            .times(1)
            .returning(|params| Box::pin(future::ready(Ok(digest(params)))));

        let service = Service::new(db, insight_service(vec![], vec![]));
        let result = service
            .generate_weekly_digest(GenerateDigestParams {
                team_id: "team_1".to_string(),
                date: Some(date!(2024 - 05 - 15)),
            })
            .await
            .unwrap();

        let DigestMetrics::Weekly(metrics) = result.metrics else {
            panic!("expected weekly metrics");
        };
        assert_eq!(0, metrics.scores.wellness);
        assert_eq!(Standing::NeedsImprovement, metrics.weekly_trends.wellness);
    }

    #[tokio::test]
    async fn test_generate_daily_digest_insight_failure() {
        let mut insights = MockInsightService::new();
        insights.expect_generate_all_insights().times(1).returning(|_| {
            Box::pin(future::ready(Err(InsightError::Validation(
                "bad".to_string(),
            ))))
        });

        let mut db = MockPulseRepository::new();
        db.expect_create_team_metric().times(0);
        db.expect_create_pulse_digest().times(0);

        let service = Service::new(db, insights);
        let result = service
            .generate_daily_digest(GenerateDigestParams {
                team_id: "team_1".to_string(),
                date: None,
            })
            .await;

        assert!(matches!(result, Err(PulseError::Insights(_))));
    }

    #[tokio::test]
    async fn test_list_team_pulse_digests_zero_limit() {
        let mut db = MockPulseRepository::new();
        db.expect_list_pulse_digests_by_team().times(0);

        let service = Service::new(db, MockInsightService::new());
        let result = service
            .list_team_pulse_digests(ListTeamDigestsParams {
                team_id: "team_1".to_string(),
                limit: 0,
            })
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_record_team_metric_rejects_out_of_range() {
        let mut db = MockPulseRepository::new();
        db.expect_create_team_metric().times(0);

        let service = Service::new(db, MockInsightService::new());
        let result = service
            .record_team_metric(RecordTeamMetricParams {
                team_id: "team_1".to_string(),
                date: date!(2024 - 05 - 15),
                scores: Scores {
                    collaboration: -1,
                    productivity: 50,
                    morale: 50,
                    wellness: 50,
                },
                data: None,
            })
            .await;

        assert!(matches!(result, Err(PulseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_team_metrics_rejects_reversed_range() {
        let service = Service::new(MockPulseRepository::new(), MockInsightService::new());
        let result = service
            .list_team_metrics(ListTeamMetricsParams {
                team_id: "team_1".to_string(),
                start: date!(2024 - 05 - 18),
                end: date!(2024 - 05 - 12),
            })
            .await;

        assert!(matches!(result, Err(PulseError::Validation(_))));
    }
}
