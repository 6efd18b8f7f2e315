use crate::domain::integrations::{
    ConfigureIntegrationServiceParams, CreateIntegrationDBParams, CreateIntegrationServiceParams,
    FindIntegrationByTypeDBParams, FindIntegrationDBParams, Integration, IntegrationError,
    IntegrationRepository, IntegrationService, IntegrationServiceParams,
    ListIntegrationsDBParams, TeamIntegrationByTypeParams, TeamIntegrationsParams,
    UpdateIntegrationDBParams, UpdateIntegrationServiceParams, UpsertIntegrationDBParams,
};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: IntegrationRepository,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: IntegrationRepository,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<DB> IntegrationService for Service<DB>
where
    DB: IntegrationRepository,
{
    async fn create_integration(
        &self,
        params: CreateIntegrationServiceParams,
    ) -> Result<Integration, IntegrationError> {
        if params.team_id.trim().is_empty() {
            return Err(IntegrationError::Validation("teamId is required".to_string()));
        }
        if params.name.trim().is_empty() {
            return Err(IntegrationError::Validation("name is required".to_string()));
        }
        if let Some(config) = &params.config {
            if config.integration_type() != params.integration_type {
                return Err(IntegrationError::Validation(format!(
                    "{} config given for a {} integration",
                    config.integration_type(),
                    params.integration_type
                )));
            }
            config.validate().map_err(IntegrationError::Validation)?;
        }

        let team_id = params.team_id.clone();
        let integration_type = params.integration_type;
        let integration = self
            .db
            .create_integration(CreateIntegrationDBParams {
                team_id: params.team_id,
                integration_type: params.integration_type,
                name: params.name.trim().to_string(),
                config: params.config,
                active: params.active,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %team_id,
                    integration_type = %integration_type,
                    "error creating integration"
                )
            })?;

        tracing::info!(
            integration_id = %integration.id,
            integration_type = %integration.integration_type,
            "integration created"
        );

        Ok(integration)
    }

    async fn get_integration(
        &self,
        params: IntegrationServiceParams,
    ) -> Result<Option<Integration>, IntegrationError> {
        let integration = self
            .db
            .find_integration_by_id(FindIntegrationDBParams {
                team_id: params.team_id,
                integration_id: params.integration_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    integration_id = %params.integration_id,
                    "error getting integration"
                )
            })?;

        Ok(integration)
    }

    async fn get_team_integration_by_type(
        &self,
        params: TeamIntegrationByTypeParams,
    ) -> Result<Option<Integration>, IntegrationError> {
        let integration = self
            .db
            .find_integration_by_team_and_type(FindIntegrationByTypeDBParams {
                team_id: params.team_id.clone(),
                integration_type: params.integration_type,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    integration_type = %params.integration_type,
                    "error getting team integration by type"
                )
            })?;

        Ok(integration)
    }

    async fn list_team_integrations(
        &self,
        params: TeamIntegrationsParams,
    ) -> Result<Vec<Integration>, IntegrationError> {
        let integrations = self
            .db
            .list_integrations_by_team(ListIntegrationsDBParams {
                team_id: params.team_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %params.team_id,
                    "error getting team integrations"
                )
            })?;

        Ok(integrations)
    }

    async fn update_integration(
        &self,
        params: UpdateIntegrationServiceParams,
    ) -> Result<Option<Integration>, IntegrationError> {
        let name = match params.name {
            Some(name) if name.trim().is_empty() => {
                return Err(IntegrationError::Validation(
                    "name must not be empty".to_string(),
                ));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let integration = self
            .db
            .update_integration(UpdateIntegrationDBParams {
                team_id: params.team_id,
                integration_id: params.integration_id.clone(),
                name,
                active: params.active,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    integration_id = %params.integration_id,
                    "error updating integration"
                )
            })?;

        if let Some(integration) = &integration {
            tracing::info!(
                integration_id = %integration.id,
                integration_type = %integration.integration_type,
                active = integration.active,
                "integration updated"
            );
        }

        Ok(integration)
    }

    async fn configure_integration(
        &self,
        params: ConfigureIntegrationServiceParams,
    ) -> Result<Integration, IntegrationError> {
        params
            .config
            .validate()
            .map_err(IntegrationError::Validation)?;

        let integration_type = params.config.integration_type();
        let team_id = params.team_id.clone();
        let integration = self
            .db
            .upsert_integration(UpsertIntegrationDBParams {
                team_id: params.team_id,
                integration_type,
                name: integration_type.display_name().to_string(),
                config: params.config,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    team_id = %team_id,
                    integration_type = %integration_type,
                    "error configuring integration"
                )
            })?;

        tracing::info!(
            integration_id = %integration.id,
            integration_type = %integration.integration_type,
            "integration configured"
        );

        Ok(integration)
    }

    async fn delete_integration(
        &self,
        params: IntegrationServiceParams,
    ) -> Result<bool, IntegrationError> {
        let deleted = self
            .db
            .delete_integration(FindIntegrationDBParams {
                team_id: params.team_id,
                integration_id: params.integration_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    integration_id = %params.integration_id,
                    "error deleting integration"
                )
            })?;

        if deleted {
            tracing::info!(integration_id = %params.integration_id, "integration deleted");
        }

        Ok(deleted)
    }
}
