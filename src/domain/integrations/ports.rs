use crate::domain::integrations::{Integration, IntegrationConfig, IntegrationType};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait IntegrationService: Send + Sync {
    async fn create_integration(
        &self,
        params: CreateIntegrationServiceParams,
    ) -> Result<Integration, IntegrationError>;
    async fn get_integration(
        &self,
        params: IntegrationServiceParams,
    ) -> Result<Option<Integration>, IntegrationError>;
    async fn get_team_integration_by_type(
        &self,
        params: TeamIntegrationByTypeParams,
    ) -> Result<Option<Integration>, IntegrationError>;
    async fn list_team_integrations(
        &self,
        params: TeamIntegrationsParams,
    ) -> Result<Vec<Integration>, IntegrationError>;
    async fn update_integration(
        &self,
        params: UpdateIntegrationServiceParams,
    ) -> Result<Option<Integration>, IntegrationError>;

    /// Connects a source: updates the team's integration of that type or creates it,
    /// and marks it active either way.
    async fn configure_integration(
        &self,
        params: ConfigureIntegrationServiceParams,
    ) -> Result<Integration, IntegrationError>;
    async fn delete_integration(
        &self,
        params: IntegrationServiceParams,
    ) -> Result<bool, IntegrationError>;
}

pub struct CreateIntegrationServiceParams {
    pub team_id: String,
    pub integration_type: IntegrationType,
    pub name: String,
    pub config: Option<IntegrationConfig>,
    pub active: bool,
}

pub struct IntegrationServiceParams {
    pub team_id: String,
    pub integration_id: String,
}

pub struct TeamIntegrationByTypeParams {
    pub team_id: String,
    pub integration_type: IntegrationType,
}

pub struct TeamIntegrationsParams {
    pub team_id: String,
}

pub struct UpdateIntegrationServiceParams {
    pub team_id: String,
    pub integration_id: String,
    pub name: Option<String>,
    pub active: Option<bool>,
}

pub struct ConfigureIntegrationServiceParams {
    pub team_id: String,
    pub config: IntegrationConfig,
}

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("invalid integration: {0}")]
    Validation(String),

    #[error("failed to access integrations because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait IntegrationRepository: Send + Sync + 'static {
    async fn create_integration(
        &self,
        params: CreateIntegrationDBParams,
    ) -> Result<Integration, DatabaseError>;
    async fn find_integration_by_id(
        &self,
        params: FindIntegrationDBParams,
    ) -> Result<Option<Integration>, DatabaseError>;
    async fn find_integration_by_team_and_type(
        &self,
        params: FindIntegrationByTypeDBParams,
    ) -> Result<Option<Integration>, DatabaseError>;
    async fn list_integrations_by_team(
        &self,
        params: ListIntegrationsDBParams,
    ) -> Result<Vec<Integration>, DatabaseError>;
    async fn update_integration(
        &self,
        params: UpdateIntegrationDBParams,
    ) -> Result<Option<Integration>, DatabaseError>;

    /// Single-statement insert-or-update keyed by (team, type).
    async fn upsert_integration(
        &self,
        params: UpsertIntegrationDBParams,
    ) -> Result<Integration, DatabaseError>;
    async fn delete_integration(
        &self,
        params: FindIntegrationDBParams,
    ) -> Result<bool, DatabaseError>;
}

//------------------------------------------------------------------------------
// Create Integration
//------------------------------------------------------------------------------

pub struct CreateIntegrationDBParams {
    pub team_id: String,
    pub integration_type: IntegrationType,
    pub name: String,
    pub config: Option<IntegrationConfig>,
    pub active: bool,
}

//------------------------------------------------------------------------------
// Find Integration
//------------------------------------------------------------------------------

pub struct FindIntegrationDBParams {
    pub team_id: String,
    pub integration_id: String,
}

pub struct FindIntegrationByTypeDBParams {
    pub team_id: String,
    pub integration_type: IntegrationType,
}

pub struct ListIntegrationsDBParams {
    pub team_id: String,
}

//------------------------------------------------------------------------------
// Update Integration
//------------------------------------------------------------------------------

pub struct UpdateIntegrationDBParams {
    pub team_id: String,
    pub integration_id: String,
    pub name: Option<String>,
    pub active: Option<bool>,
}

//------------------------------------------------------------------------------
// Upsert Integration
//------------------------------------------------------------------------------

pub struct UpsertIntegrationDBParams {
    pub team_id: String,
    pub integration_type: IntegrationType,
    pub name: String,
    pub config: IntegrationConfig,
}
