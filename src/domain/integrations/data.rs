use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const REDACTED: &str = "********";

text_enum! {
    pub enum IntegrationType: "integration type" {
        Slack => "slack",
        Linear => "linear",
        Github => "github",
        Calendar => "calendar",
        Hr => "hr",
    }
}

impl IntegrationType {
    /// Name given to integrations created through `configure`.
    pub fn display_name(&self) -> &'static str {
        match self {
            IntegrationType::Slack => "Slack",
            IntegrationType::Linear => "Linear",
            IntegrationType::Github => "GitHub",
            IntegrationType::Calendar => "Calendar",
            IntegrationType::Hr => "HR",
        }
    }
}

text_enum! {
    pub enum CalendarProvider: "calendar provider" {
        Google => "google",
        Outlook => "outlook",
    }
}

text_enum! {
    pub enum HrProvider: "hr provider" {
        Gusto => "gusto",
        BambooHr => "bamboohr",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    pub token: String,
    pub workspace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubConfig {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub provider: CalendarProvider,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrConfig {
    pub provider: HrProvider,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Source-specific connection settings, tagged by integration type when stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IntegrationConfig {
    Slack(SlackConfig),
    Linear(LinearConfig),
    Github(GithubConfig),
    Calendar(CalendarConfig),
    Hr(HrConfig),
}

impl IntegrationConfig {
    /// Parses an untagged config body for the given integration type.
    pub fn from_untagged(
        integration_type: IntegrationType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let config = match integration_type {
            IntegrationType::Slack => IntegrationConfig::Slack(serde_json::from_value(value)?),
            IntegrationType::Linear => IntegrationConfig::Linear(serde_json::from_value(value)?),
            IntegrationType::Github => IntegrationConfig::Github(serde_json::from_value(value)?),
            IntegrationType::Calendar => {
                IntegrationConfig::Calendar(serde_json::from_value(value)?)
            }
            IntegrationType::Hr => IntegrationConfig::Hr(serde_json::from_value(value)?),
        };

        Ok(config)
    }

    /// The variant's fields without the type tag.
    pub fn to_untagged(&self) -> serde_json::Value {
        let value = match self {
            IntegrationConfig::Slack(config) => serde_json::to_value(config),
            IntegrationConfig::Linear(config) => serde_json::to_value(config),
            IntegrationConfig::Github(config) => serde_json::to_value(config),
            IntegrationConfig::Calendar(config) => serde_json::to_value(config),
            IntegrationConfig::Hr(config) => serde_json::to_value(config),
        };

        value.unwrap_or(serde_json::Value::Null)
    }

    pub fn integration_type(&self) -> IntegrationType {
        match self {
            IntegrationConfig::Slack(_) => IntegrationType::Slack,
            IntegrationConfig::Linear(_) => IntegrationType::Linear,
            IntegrationConfig::Github(_) => IntegrationType::Github,
            IntegrationConfig::Calendar(_) => IntegrationType::Calendar,
            IntegrationConfig::Hr(_) => IntegrationType::Hr,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let (field, secret) = match self {
            IntegrationConfig::Slack(config) => {
                if config.workspace.trim().is_empty() {
                    return Err("workspace must not be empty".to_string());
                }
                ("token", &config.token)
            }
            IntegrationConfig::Linear(config) => ("apiKey", &config.api_key),
            IntegrationConfig::Github(config) => ("token", &config.token),
            IntegrationConfig::Calendar(config) => ("token", &config.token),
            IntegrationConfig::Hr(config) => ("apiKey", &config.api_key),
        };

        if secret.trim().is_empty() {
            return Err(format!("{field} must not be empty"));
        }

        Ok(())
    }

    /// Copy with tokens and api keys masked, safe to hand back to clients.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        match &mut config {
            IntegrationConfig::Slack(c) => c.token = REDACTED.to_string(),
            IntegrationConfig::Linear(c) => c.api_key = REDACTED.to_string(),
            IntegrationConfig::Github(c) => c.token = REDACTED.to_string(),
            IntegrationConfig::Calendar(c) => c.token = REDACTED.to_string(),
            IntegrationConfig::Hr(c) => c.api_key = REDACTED.to_string(),
        }

        config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub id: String,
    pub team_id: String,
    pub integration_type: IntegrationType,
    pub name: String,
    pub config: Option<IntegrationConfig>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
