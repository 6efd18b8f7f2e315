use crate::core::application::ApplicationServices;
use crate::domain::pulse::{
    DEFAULT_DIGEST_LIMIT, DigestType, GenerateDigestParams, LatestDigestParams,
    ListTeamDigestsParams, ListTeamMetricsParams, MetricData, PulseDigestParams, PulseService,
    RecordTeamMetricParams, Scores,
};
use crate::errors::{AppError, not_found};
use crate::inbound::http::extract::{AppJson, AppPath, AppQuery};
use crate::inbound::http::responses::pulse::{
    PulseDigestResponse, PulseDigestsResponse, TeamMetricResponse,
};
use crate::inbound::http::responses::shared::iso_date;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct ListDigestsQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_DIGEST_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct LatestDigestQuery {
    #[serde(default = "default_digest_type", rename = "type")]
    digest_type: DigestType,
}

fn default_digest_type() -> DigestType {
    DigestType::Daily
}

#[derive(Debug, Deserialize)]
pub struct GenerateDigestQuery {
    #[serde(default, with = "iso_date::option")]
    date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct MetricRangeQuery {
    #[serde(with = "iso_date")]
    start: Date,
    #[serde(with = "iso_date")]
    end: Date,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetricBody {
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(flatten)]
    scores: Scores,
    #[serde(default)]
    data: Option<MetricData>,
}

pub async fn list_team_digests<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppQuery(query): AppQuery<ListDigestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let digests = state
        .pulse_service()
        .list_team_pulse_digests(ListTeamDigestsParams {
            team_id,
            limit: query.limit,
        })
        .await?;

    Ok(Json(PulseDigestsResponse::from(digests)))
}

pub async fn get_digest<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(digest_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let digest = state
        .pulse_service()
        .get_pulse_digest(PulseDigestParams { digest_id })
        .await?
        .ok_or_else(|| not_found("pulse digest"))?;

    Ok(Json(PulseDigestResponse::from(digest)))
}

pub async fn get_latest_digest<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppQuery(query): AppQuery<LatestDigestQuery>,
) -> Result<impl IntoResponse, AppError> {
    let digest = state
        .pulse_service()
        .get_latest_team_pulse_digest(LatestDigestParams {
            team_id,
            digest_type: query.digest_type,
        })
        .await?
        .ok_or_else(|| not_found("pulse digest"))?;

    Ok(Json(PulseDigestResponse::from(digest)))
}

pub async fn generate_digest<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, digest_type)): AppPath<(String, DigestType)>,
    AppQuery(query): AppQuery<GenerateDigestQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pulse_service = state.pulse_service();
    let params = GenerateDigestParams {
        team_id,
        date: query.date,
    };

    let digest = match digest_type {
        DigestType::Daily => pulse_service.generate_daily_digest(params).await?,
        DigestType::Weekly => pulse_service.generate_weekly_digest(params).await?,
    };

    Ok((StatusCode::CREATED, Json(PulseDigestResponse::from(digest))))
}

pub async fn list_team_metrics<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppQuery(query): AppQuery<MetricRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = state
        .pulse_service()
        .list_team_metrics(ListTeamMetricsParams {
            team_id,
            start: query.start,
            end: query.end,
        })
        .await?;

    Ok(Json(
        metrics
            .into_iter()
            .map(TeamMetricResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn record_team_metric<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppJson(body): AppJson<RecordMetricBody>,
) -> Result<impl IntoResponse, AppError> {
    let metric = state
        .pulse_service()
        .record_team_metric(RecordTeamMetricParams {
            team_id,
            date: body.date,
            scores: body.scores,
            data: body.data,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamMetricResponse::from(metric))))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::pulse::{
        DailyMetrics, DigestInsights, DigestMetrics, DigestType, MetricTrends, MockPulseService,
        PulseDigest, PulseError, Scores, TeamMetric,
    };
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use std::future;
    use time::OffsetDateTime;
    use time::macros::date;

    fn server(pulse_service: MockPulseService) -> TestServer {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            pulse_service: Some(pulse_service),
            ..Default::default()
        });

        TestServer::new(router(app)).unwrap()
    }

    fn scores() -> Scores {
        Scores {
            collaboration: 80,
            productivity: 81,
            morale: 82,
            wellness: 83,
        }
    }

    fn daily_digest(team_id: &str) -> PulseDigest {
        let now = OffsetDateTime::now_utc();
        PulseDigest {
            id: "plse_1".to_string(),
            team_id: team_id.to_string(),
            date: date!(2024 - 05 - 13),
            digest_type: DigestType::Daily,
            insights: DigestInsights {
                high: vec!["inst_1".to_string()],
                medium: vec![],
                low: vec![],
            },
            metrics: DigestMetrics::Daily(DailyMetrics {
                scores: scores(),
                trends: MetricTrends::DAILY,
                highlights: vec![],
            }),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_generate_daily_digest_with_date() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_generate_daily_digest()
            .withf(|params| params.team_id == "team_1" && params.date == Some(date!(2024 - 05 - 13)))
            .times(1)
            .returning(|params| Box::pin(future::ready(Ok(daily_digest(&params.team_id)))));

        let response = server(pulse_service)
            .post("/api/pulse/teams/team_1/digests/daily")
            .add_query_param("date", "2024-05-13")
            .await;

        response.assert_status(http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!("daily", body["digest"]["type"]);
        assert_eq!("2024-05-13", body["digest"]["date"]);
        assert_eq!(json!(["inst_1"]), body["digest"]["insights"]["high"]);
        assert_eq!(80, body["digest"]["metrics"]["collaborationScore"]);
    }

    #[tokio::test]
    async fn test_generate_weekly_digest_without_date() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_generate_weekly_digest()
            .withf(|params| params.date.is_none())
            .times(1)
            .returning(|params| {
                let mut digest = daily_digest(&params.team_id);
                digest.digest_type = DigestType::Weekly;
                Box::pin(future::ready(Ok(digest)))
            });

        let response = server(pulse_service)
            .post("/api/pulse/teams/team_1/digests/weekly")
            .await;

        response.assert_status(http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_generate_digest_rejects_bad_date() {
        let response = server(MockPulseService::new())
            .post("/api/pulse/teams/team_1/digests/daily")
            .add_query_param("date", "13/05/2024")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_generate_digest_rejects_unknown_type() {
        let response = server(MockPulseService::new())
            .post("/api/pulse/teams/team_1/digests/monthly")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_list_digests_defaults_limit() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_list_team_pulse_digests()
            .withf(|params| params.limit == 10)
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![]))));

        let response = server(pulse_service)
            .get("/api/pulse/teams/team_1/digests")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"digests": []}));
    }

    #[tokio::test]
    async fn test_list_digests_passes_zero_limit() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_list_team_pulse_digests()
            .withf(|params| params.limit == 0)
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![]))));

        let response = server(pulse_service)
            .get("/api/pulse/teams/team_1/digests")
            .add_query_param("limit", 0)
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_latest_digest_not_found() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_get_latest_team_pulse_digest()
            .withf(|params| params.digest_type == DigestType::Weekly)
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(None))));

        let response = server(pulse_service)
            .get("/api/pulse/teams/team_1/digests/latest")
            .add_query_param("type", "weekly")
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_get_digest_by_id() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_get_pulse_digest()
            .withf(|params| params.digest_id == "plse_1")
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(Some(daily_digest("team_1"))))));

        let response = server(pulse_service)
            .get("/api/pulse/digests/plse_1")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!("plse_1", body["digest"]["id"]);
    }

    #[tokio::test]
    async fn test_record_metric() {
        let mut pulse_service = MockPulseService::new();
        pulse_service
            .expect_record_team_metric()
            .withf(|params| params.scores == scores() && params.data.is_none())
            .times(1)
            .returning(|params| {
                let now = OffsetDateTime::now_utc();
                Box::pin(future::ready(Ok(TeamMetric {
                    id: "tmet_1".to_string(),
                    team_id: params.team_id,
                    date: params.date,
                    scores: params.scores,
                    data: params.data,
                    created_at: now,
                    updated_at: now,
                })))
            });

        let response = server(pulse_service)
            .post("/api/pulse/teams/team_1/metrics")
            .json(&json!({
                "date": "2024-05-13",
                "collaborationScore": 80,
                "productivityScore": 81,
                "moraleScore": 82,
                "wellnessScore": 83
            }))
            .await;

        response.assert_status(http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(83, body["wellnessScore"]);
    }

    #[tokio::test]
    async fn test_metric_range_validation_error() {
        let mut pulse_service = MockPulseService::new();
        pulse_service.expect_list_team_metrics().times(1).returning(|_| {
            Box::pin(future::ready(Err(PulseError::Validation(
                "start must not be after end".to_string(),
            ))))
        });

        let response = server(pulse_service)
            .get("/api/pulse/teams/team_1/metrics")
            .add_query_param("start", "2024-05-20")
            .add_query_param("end", "2024-05-13")
            .await;

        response.assert_status_bad_request();
    }
}
