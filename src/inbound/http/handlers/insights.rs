use crate::core::application::ApplicationServices;
use crate::domain::insights::{
    CreateInsightServiceParams, GenerateSourceInsightsParams, Insight, InsightData, InsightPriority,
    InsightService, InsightServiceParams, InsightSource, InsightStatus, InsightType,
    TeamInsightsParams, UpdateInsightStatusServiceParams,
};
use crate::domain::integrations::IntegrationType;
use crate::errors::{AppError, internal_error, not_found};
use crate::inbound::http::extract::{AppJson, AppPath};
use crate::inbound::http::responses::insights::InsightResponse;
use crate::inbound::http::responses::shared::SuccessResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Deserialize;

/// Lists the sources that failed during a full generation run.
pub const SOURCE_FAILURES_HEADER: HeaderName =
    HeaderName::from_static("x-insight-source-failures");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsightBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    insight_type: InsightType,
    #[serde(default)]
    priority: InsightPriority,
    #[serde(default = "manual_source")]
    source: InsightSource,
    #[serde(default)]
    status: InsightStatus,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

fn manual_source() -> InsightSource {
    InsightSource::System
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    status: InsightStatus,
}

/// Keeps payloads that already carry a known `kind`, wraps anything else.
fn insight_data(value: serde_json::Value) -> InsightData {
    serde_json::from_value(value.clone()).unwrap_or(InsightData::Custom(value))
}

fn insight_list(insights: Vec<Insight>) -> Vec<InsightResponse> {
    insights.into_iter().map(InsightResponse::from).collect()
}

pub async fn list_insights<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let insights = state
        .insight_service()
        .list_team_insights(TeamInsightsParams { team_id })
        .await?;

    Ok(Json(insight_list(insights)))
}

pub async fn create_insight<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppJson(body): AppJson<CreateInsightBody>,
) -> Result<impl IntoResponse, AppError> {
    let insight = state
        .insight_service()
        .create_insight(CreateInsightServiceParams {
            team_id,
            title: body.title,
            description: body.description,
            insight_type: body.insight_type,
            priority: body.priority,
            source: body.source,
            status: body.status,
            data: body.data.map(insight_data),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InsightResponse::from(insight))))
}

pub async fn get_insight<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, insight_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let insight = state
        .insight_service()
        .get_insight(InsightServiceParams {
            team_id,
            insight_id,
        })
        .await?
        .ok_or_else(|| not_found("insight"))?;

    Ok(Json(InsightResponse::from(insight)))
}

pub async fn update_insight_status<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, insight_id)): AppPath<(String, String)>,
    AppJson(body): AppJson<UpdateStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    let insight = state
        .insight_service()
        .update_insight_status(UpdateInsightStatusServiceParams {
            team_id,
            insight_id,
            status: body.status,
        })
        .await?
        .ok_or_else(|| not_found("insight"))?;

    Ok(Json(InsightResponse::from(insight)))
}

pub async fn delete_insight<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, insight_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .insight_service()
        .delete_insight(InsightServiceParams {
            team_id,
            insight_id,
        })
        .await?;

    if !deleted {
        return Err(not_found("insight"));
    }

    Ok(Json(SuccessResponse::ok()))
}

pub async fn generate_all_insights<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .insight_service()
        .generate_all_insights(TeamInsightsParams { team_id })
        .await?;

    let mut headers = HeaderMap::new();
    if !result.failures.is_empty() {
        let sources = result
            .failures
            .iter()
            .map(|failure| failure.source.as_str())
            .collect::<Vec<_>>()
            .join(",");
        headers.insert(
            SOURCE_FAILURES_HEADER,
            HeaderValue::from_str(&sources).map_err(internal_error)?,
        );
    }

    Ok((StatusCode::CREATED, headers, Json(insight_list(result.insights))))
}

pub async fn generate_source_insights<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, source)): AppPath<(String, IntegrationType)>,
) -> Result<impl IntoResponse, AppError> {
    let insights = state
        .insight_service()
        .generate_source_insights(GenerateSourceInsightsParams { team_id, source })
        .await?;

    Ok((StatusCode::CREATED, Json(insight_list(insights))))
}
