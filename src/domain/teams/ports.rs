use crate::domain::teams::{Team, TeamMember, TeamRole};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamService: Send + Sync {
    async fn list_user_teams(&self, params: ListUserTeamsParams) -> Result<Vec<Team>, TeamError>;
    async fn create_team(&self, params: CreateTeamServiceParams) -> Result<Team, TeamError>;
    async fn get_team(&self, params: TeamServiceParams) -> Result<Option<Team>, TeamError>;
    async fn update_team(
        &self,
        params: UpdateTeamServiceParams,
    ) -> Result<Option<Team>, TeamError>;
    async fn delete_team(&self, params: TeamServiceParams) -> Result<bool, TeamError>;
    async fn list_members(&self, params: TeamServiceParams)
    -> Result<Vec<TeamMember>, TeamError>;
    async fn add_member(&self, params: AddMemberServiceParams) -> Result<TeamMember, TeamError>;
    async fn remove_member(&self, params: RemoveMemberServiceParams) -> Result<bool, TeamError>;
}

pub struct ListUserTeamsParams {
    pub user_id: String,
}

pub struct CreateTeamServiceParams {
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
}

pub struct TeamServiceParams {
    pub team_id: String,
}

pub struct UpdateTeamServiceParams {
    pub team_id: String,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct AddMemberServiceParams {
    pub team_id: String,
    pub user_id: String,
    pub role: TeamRole,
}

pub struct RemoveMemberServiceParams {
    pub team_id: String,
    pub user_id: String,
}

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("invalid team: {0}")]
    Validation(String),

    #[error("user is already a member of this team")]
    AlreadyMember,

    #[error("team does not exist")]
    TeamNotFound,

    #[error("failed to access teams because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamRepository: Send + Sync + 'static {
    async fn ensure_user(&self, params: EnsureUserDBParams) -> Result<(), DatabaseError>;

    /// Inserts the team and the owner's admin membership in one transaction.
    async fn create_team(&self, params: CreateTeamDBParams) -> Result<Team, DatabaseError>;
    async fn update_team(&self, params: UpdateTeamDBParams)
    -> Result<Option<Team>, DatabaseError>;
    async fn delete_team(&self, params: FindTeamDBParams) -> Result<bool, DatabaseError>;
    async fn find_team_by_id(&self, params: FindTeamDBParams)
    -> Result<Option<Team>, DatabaseError>;
    async fn list_teams_for_user(
        &self,
        params: ListTeamsForUserDBParams,
    ) -> Result<Vec<Team>, DatabaseError>;

    async fn create_team_member(
        &self,
        params: CreateTeamMemberDBParams,
    ) -> Result<TeamMember, DatabaseError>;
    async fn list_team_members(
        &self,
        params: FindTeamDBParams,
    ) -> Result<Vec<TeamMember>, DatabaseError>;
    async fn delete_team_member(
        &self,
        params: DeleteTeamMemberDBParams,
    ) -> Result<bool, DatabaseError>;
}

//------------------------------------------------------------------------------
// Users
//------------------------------------------------------------------------------

pub struct EnsureUserDBParams {
    pub user_id: String,
}

//------------------------------------------------------------------------------
// Teams
//------------------------------------------------------------------------------

pub struct CreateTeamDBParams {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
}

pub struct UpdateTeamDBParams {
    pub team_id: String,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct FindTeamDBParams {
    pub team_id: String,
}

pub struct ListTeamsForUserDBParams {
    pub user_id: String,
}

//------------------------------------------------------------------------------
// Team Members
//------------------------------------------------------------------------------

pub struct CreateTeamMemberDBParams {
    pub team_id: String,
    pub user_id: String,
    pub role: TeamRole,
}

pub struct DeleteTeamMemberDBParams {
    pub team_id: String,
    pub user_id: String,
}
