use crate::core::application::ApplicationServices;
use crate::domain::vault::{
    CreateEventServiceParams, EventServiceParams, EventType, ListTeamEventsParams, VaultService,
};
use crate::errors::{AppError, not_found};
use crate::inbound::http::extract::{AppJson, AppPath, AppQuery};
use crate::inbound::http::responses::shared::{SuccessResponse, iso_date};
use crate::inbound::http::responses::vault::EventResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default, rename = "type")]
    event_type: Option<EventType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventBody {
    #[serde(rename = "type")]
    event_type: EventType,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

pub async fn list_events<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppQuery(query): AppQuery<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = state
        .vault_service()
        .list_team_events(ListTeamEventsParams {
            team_id,
            event_type: query.event_type,
        })
        .await?;

    Ok(Json(
        events.into_iter().map(EventResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn create_event<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(team_id): AppPath<String>,
    AppJson(body): AppJson<CreateEventBody>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .vault_service()
        .create_event(CreateEventServiceParams {
            team_id,
            event_type: body.event_type,
            title: body.title,
            description: body.description,
            date: body.date,
            tags: body.tags,
            data: body.data,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn get_event<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, event_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .vault_service()
        .get_event(EventServiceParams { team_id, event_id })
        .await?
        .ok_or_else(|| not_found("event"))?;

    Ok(Json(EventResponse::from(event)))
}

pub async fn delete_event<S: ApplicationServices>(
    State(state): State<S>,
    AppPath((team_id, event_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .vault_service()
        .delete_event(EventServiceParams { team_id, event_id })
        .await?;

    if !deleted {
        return Err(not_found("event"));
    }

    Ok(Json(SuccessResponse::ok()))
}
