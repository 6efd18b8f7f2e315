use crate::core::application::ApplicationServices;
use crate::domain::integrations::{
    ConfigureIntegrationServiceParams, IntegrationConfig, IntegrationService,
    IntegrationServiceParams, IntegrationType, TeamIntegrationsParams,
    UpdateIntegrationServiceParams,
};
use crate::errors::{AppError, bad_request, not_found};
use crate::inbound::http::extract::{AppJson, AppPath};
use crate::inbound::http::responses::integrations::IntegrationResponse;
use crate::inbound::http::responses::shared::SuccessResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrationBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    active: Option<bool>,
}

pub async fn list_integrations<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let integrations = state
        .integration_service()
        .list_team_integrations(TeamIntegrationsParams { team_id })
        .await?;

    Ok(Json(
        integrations
            .into_iter()
            .map(IntegrationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_integration<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, integration_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let integration = state
        .integration_service()
        .get_integration(IntegrationServiceParams {
            team_id,
            integration_id,
        })
        .await?
        .ok_or_else(|| not_found("integration"))?;

    Ok(Json(IntegrationResponse::from(integration)))
}

pub async fn update_integration<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, integration_id)): AppPath<(String, String)>,
    AppJson(body): AppJson<UpdateIntegrationBody>,
) -> Result<impl IntoResponse, AppError> {
    let integration = state
        .integration_service()
        .update_integration(UpdateIntegrationServiceParams {
            team_id,
            integration_id,
            name: body.name,
            active: body.active,
        })
        .await?
        .ok_or_else(|| not_found("integration"))?;

    Ok(Json(IntegrationResponse::from(integration)))
}

pub async fn delete_integration<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, integration_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .integration_service()
        .delete_integration(IntegrationServiceParams {
            team_id,
            integration_id,
        })
        .await?;

    if !deleted {
        return Err(not_found("integration"));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Connects a source for the team. The body holds that source's settings.
pub async fn configure_integration<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, integration_type)): AppPath<(String, IntegrationType)>,
    AppJson(body): AppJson<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let config = IntegrationConfig::from_untagged(integration_type, body).map_err(bad_request)?;

    let integration = state
        .integration_service()
        .configure_integration(ConfigureIntegrationServiceParams { team_id, config })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IntegrationResponse::from(integration)),
    ))
}
