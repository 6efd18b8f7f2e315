use crate::domain::teams::{
    AddMemberServiceParams, CreateTeamDBParams, CreateTeamMemberDBParams,
    CreateTeamServiceParams, DeleteTeamMemberDBParams, EnsureUserDBParams, FindTeamDBParams,
    ListTeamsForUserDBParams, ListUserTeamsParams, RemoveMemberServiceParams, Team, TeamError,
    TeamMember, TeamRepository, TeamService, TeamServiceParams, UpdateTeamDBParams,
    UpdateTeamServiceParams,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;

const MAX_TEAM_NAME_LEN: usize = 255;

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: TeamRepository,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: TeamRepository,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

fn validate_name(name: &str) -> Result<String, TeamError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TeamError::Validation("name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_TEAM_NAME_LEN {
        return Err(TeamError::Validation(format!(
            "name must be at most {MAX_TEAM_NAME_LEN} characters"
        )));
    }

    Ok(name.to_string())
}

#[async_trait]
impl<DB> TeamService for Service<DB>
where
    DB: TeamRepository,
{
    async fn list_user_teams(&self, params: ListUserTeamsParams) -> Result<Vec<Team>, TeamError> {
        let teams = self
            .db
            .list_teams_for_user(ListTeamsForUserDBParams {
                user_id: params.user_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, user_id = %params.user_id, "error getting user teams")
            })?;

        Ok(teams)
    }

    async fn create_team(&self, params: CreateTeamServiceParams) -> Result<Team, TeamError> {
        let name = validate_name(&params.name)?;

        self.db
            .ensure_user(EnsureUserDBParams {
                user_id: params.owner_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, owner_id = %params.owner_id, "error ensuring team owner")
            })?;

        let team = self
            .db
            .create_team(CreateTeamDBParams {
                name,
                description: params.description,
                owner_id: params.owner_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, owner_id = %params.owner_id, "error creating team")
            })?;

        tracing::info!(team_id = %team.id, owner_id = %team.owner_id, "team created");

        Ok(team)
    }

    async fn get_team(&self, params: TeamServiceParams) -> Result<Option<Team>, TeamError> {
        let team = self
            .db
            .find_team_by_id(FindTeamDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team")
            })?;

        Ok(team)
    }

    async fn update_team(
        &self,
        params: UpdateTeamServiceParams,
    ) -> Result<Option<Team>, TeamError> {
        let name = params.name.as_deref().map(validate_name).transpose()?;

        let team = self
            .db
            .update_team(UpdateTeamDBParams {
                team_id: params.team_id.clone(),
                name,
                description: params.description,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error updating team")
            })?;

        if let Some(team) = &team {
            tracing::info!(team_id = %team.id, "team updated");
        }

        Ok(team)
    }

    async fn delete_team(&self, params: TeamServiceParams) -> Result<bool, TeamError> {
        let deleted = self
            .db
            .delete_team(FindTeamDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error deleting team")
            })?;

        if deleted {
            tracing::info!(team_id = %params.team_id, "team deleted");
        }

        Ok(deleted)
    }

    async fn list_members(
        &self,
        params: TeamServiceParams,
    ) -> Result<Vec<TeamMember>, TeamError> {
        let members = self
            .db
            .list_team_members(FindTeamDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team members")
            })?;

        Ok(members)
    }

    async fn add_member(&self, params: AddMemberServiceParams) -> Result<TeamMember, TeamError> {
        if params.user_id.trim().is_empty() {
            return Err(TeamError::Validation("userId must not be empty".to_string()));
        }

        self.db
            .find_team_by_id(FindTeamDBParams {
                team_id: params.team_id.clone(),
            })
            .await?
            .ok_or(TeamError::TeamNotFound)?;

        self.db
            .ensure_user(EnsureUserDBParams {
                user_id: params.user_id.clone(),
            })
            .await?;

        let result = self
            .db
            .create_team_member(CreateTeamMemberDBParams {
                team_id: params.team_id.clone(),
                user_id: params.user_id.clone(),
                role: params.role,
            })
            .await;

        match result {
            Ok(member) => {
                tracing::info!(
                    team_id = %member.team_id,
                    user_id = %member.user_id,
                    role = %member.role,
                    "team member added"
                );
                Ok(member)
            }
            Err(DatabaseError::OnConflict) => Err(TeamError::AlreadyMember),
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    user_id = %params.user_id,
                    "error adding team member"
                );
                Err(e.into())
            }
        }
    }

    async fn remove_member(&self, params: RemoveMemberServiceParams) -> Result<bool, TeamError> {
        let removed = self
            .db
            .delete_team_member(DeleteTeamMemberDBParams {
                team_id: params.team_id.clone(),
                user_id: params.user_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    user_id = %params.user_id,
                    "error removing team member"
                )
            })?;

        Ok(removed)
    }
}
