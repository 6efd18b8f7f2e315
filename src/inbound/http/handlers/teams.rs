use crate::core::application::ApplicationServices;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::teams::{
    AddMemberServiceParams, CreateTeamServiceParams, ListUserTeamsParams,
    RemoveMemberServiceParams, TeamRole, TeamService, TeamServiceParams, UpdateTeamServiceParams,
};
use crate::errors::{AppError, not_found};
use crate::inbound::http::extract::{AppJson, AppPath};
use crate::inbound::http::responses::shared::SuccessResponse;
use crate::inbound::http::responses::teams::{TeamMemberResponse, TeamResponse};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamBody {
    #[serde(default)]
    name: Option<String>,
    /// Absent keeps the description, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberBody {
    user_id: String,
    #[serde(default)]
    role: TeamRole,
}

#[derive(Debug, Deserialize)]
pub struct TeamPath {
    team_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MemberPath {
    team_id: String,
    user_id: String,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

pub async fn list_teams<S: ApplicationServices>(
    State(state): State<S>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    let teams = state
        .team_service()
        .list_user_teams(ListUserTeamsParams {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(
        teams.into_iter().map(TeamResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn create_team<S: ApplicationServices>(
    State(state): State<S>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreateTeamBody>,
) -> Result<impl IntoResponse, AppError> {
    let team = state
        .team_service()
        .create_team(CreateTeamServiceParams {
            owner_id: user.user_id,
            name: body.name,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))))
}

pub async fn get_team<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<TeamPath>,
) -> Result<impl IntoResponse, AppError> {
    let team = state
        .team_service()
        .get_team(TeamServiceParams {
            team_id: path.team_id,
        })
        .await?
        .ok_or_else(|| not_found("team"))?;

    Ok(Json(TeamResponse::from(team)))
}

pub async fn update_team<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<TeamPath>,
    AppJson(body): AppJson<UpdateTeamBody>,
) -> Result<impl IntoResponse, AppError> {
    let team = state
        .team_service()
        .update_team(UpdateTeamServiceParams {
            team_id: path.team_id,
            name: body.name,
            description: body.description,
        })
        .await?
        .ok_or_else(|| not_found("team"))?;

    Ok(Json(TeamResponse::from(team)))
}

pub async fn delete_team<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<TeamPath>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .team_service()
        .delete_team(TeamServiceParams {
            team_id: path.team_id,
        })
        .await?;

    if !deleted {
        return Err(not_found("team"));
    }

    Ok(Json(SuccessResponse::ok()))
}

pub async fn list_members<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<TeamPath>,
) -> Result<impl IntoResponse, AppError> {
    let members = state
        .team_service()
        .list_members(TeamServiceParams {
            team_id: path.team_id,
        })
        .await?;

    Ok(Json(
        members
            .into_iter()
            .map(TeamMemberResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn add_member<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<TeamPath>,
    AppJson(body): AppJson<AddMemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let member = state
        .team_service()
        .add_member(AddMemberServiceParams {
            team_id: path.team_id,
            user_id: body.user_id,
            role: body.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamMemberResponse::from(member))))
}

pub async fn remove_member<S: ApplicationServices>(
    State(state): State<S>,
    AppPath(path): AppPath<MemberPath>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state
        .team_service()
        .remove_member(RemoveMemberServiceParams {
            team_id: path.team_id,
            user_id: path.user_id,
        })
        .await?;

    if !removed {
        return Err(not_found("team member"));
    }

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::teams::{MockTeamService, Team, TeamError, TeamMember, TeamRole};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use std::future;
    use time::OffsetDateTime;

    fn team(id: &str, owner: &str) -> Team {
        let now = OffsetDateTime::now_utc();
        Team {
            id: id.to_string(),
            name: "Platform".to_string(),
            description: None,
            owner_id: owner.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn server(team_service: MockTeamService) -> TestServer {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            team_service: Some(team_service),
            ..Default::default()
        });

        TestServer::new(router(app)).unwrap()
    }

    #[tokio::test]
    async fn test_create_team_uses_caller_as_owner() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_create_team()
            .withf(|params| params.owner_id == "user_1" && params.name == "Platform")
            .times(1)
            .returning(|params| Box::pin(future::ready(Ok(team("team_1", &params.owner_id)))));

        let response = server(team_service)
            .post("/api/teams")
            .json(&json!({"name": "Platform"}))
            .await;

        response.assert_status(http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!("team_1", body["id"]);
        assert_eq!("user_1", body["ownerId"]);
    }

    #[tokio::test]
    async fn test_create_team_rejects_malformed_body() {
        let response = server(MockTeamService::new())
            .post("/api/teams")
            .json(&json!({"description": "no name"}))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(400, body["code"]);
    }

    #[tokio::test]
    async fn test_get_unknown_team_not_found() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_get_team()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(None))));

        let response = server(team_service).get("/api/teams/team_missing").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!("team not found", body["error"]);
    }

    #[tokio::test]
    async fn test_update_team_distinguishes_null_description() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_update_team()
            .withf(|params| params.name.is_none() && params.description == Some(None))
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(Some(team("team_1", "user_1"))))));

        let response = server(team_service)
            .patch("/api/teams/team_1")
            .json(&json!({"description": null}))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_delete_team_success_body() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_delete_team()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(true))));

        let response = server(team_service).delete("/api/teams/team_1").await;

        response.assert_status_ok();
        response.assert_json(&json!({"success": true}));
    }

    #[tokio::test]
    async fn test_add_member_defaults_role() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_add_member()
            .withf(|params| params.user_id == "user_2" && params.role == TeamRole::Member)
            .times(1)
            .returning(|params| {
                let now = OffsetDateTime::now_utc();
                Box::pin(future::ready(Ok(TeamMember {
                    id: "tmem_1".to_string(),
                    team_id: params.team_id,
                    user_id: params.user_id,
                    role: params.role,
                    created_at: now,
                    updated_at: now,
                })))
            });

        let response = server(team_service)
            .post("/api/teams/team_1/members")
            .json(&json!({"userId": "user_2"}))
            .await;

        response.assert_status(http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!("member", body["role"]);
    }

    #[tokio::test]
    async fn test_add_existing_member_conflict() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_add_member()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(TeamError::AlreadyMember))));

        let response = server(team_service)
            .post("/api/teams/team_1/members")
            .json(&json!({"userId": "user_2", "role": "admin"}))
            .await;

        response.assert_status(http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_remove_member_reads_both_path_segments() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_remove_member()
            .withf(|params| params.team_id == "team_1" && params.user_id == "user_2")
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(true))));

        let response = server(team_service)
            .delete("/api/teams/team_1/members/user_2")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"success": true}));
    }

    #[tokio::test]
    async fn test_list_members_reads_team_path() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_list_members()
            .withf(|params| params.team_id == "team_1")
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![]))));

        let response = server(team_service).get("/api/teams/team_1/members").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }
}
