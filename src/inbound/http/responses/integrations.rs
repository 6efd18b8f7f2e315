use crate::domain::integrations::{Integration, IntegrationType};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    id: String,
    team_id: String,
    #[serde(rename = "type")]
    integration_type: IntegrationType,
    name: String,
    /// Source settings with credentials masked.
    config: Option<serde_json::Value>,
    active: bool,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<Integration> for IntegrationResponse {
    fn from(integration: Integration) -> Self {
        Self {
            id: integration.id,
            team_id: integration.team_id,
            integration_type: integration.integration_type,
            name: integration.name,
            config: integration
                .config
                .map(|config| config.redacted().to_untagged()),
            active: integration.active,
            created_at: integration.created_at,
            updated_at: integration.updated_at,
        }
    }
}
