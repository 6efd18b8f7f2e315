use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::insights::InsightService;
use crate::domain::integrations::IntegrationService;
use crate::domain::pulse::PulseService;
use crate::domain::teams::TeamService;
use crate::domain::vault::VaultService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type AUTH: AuthService + Send;
    type TEAMS: TeamService + Send;
    type INTEGRATIONS: IntegrationService + Send;
    type INSIGHTS: InsightService + Send;
    type PULSE: PulseService + Send;
    type VAULT: VaultService + Send;

    fn config(&self) -> Config;

    fn auth_service(&self) -> Arc<Self::AUTH>;

    fn team_service(&self) -> Arc<Self::TEAMS>;

    fn integration_service(&self) -> Arc<Self::INTEGRATIONS>;

    fn insight_service(&self) -> Arc<Self::INSIGHTS>;

    fn pulse_service(&self) -> Arc<Self::PULSE>;

    fn vault_service(&self) -> Arc<Self::VAULT>;
}

pub struct Application<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>
where
    AUTH: AuthService + Send + Sync + 'static,
    TEAMS: TeamService + Send + Sync + 'static,
    INTEGRATIONS: IntegrationService + Send + Sync + 'static,
    INSIGHTS: InsightService + Send + Sync + 'static,
    PULSE: PulseService + Send + Sync + 'static,
    VAULT: VaultService + Send + Sync + 'static,
{
    config: Config,
    auth_service: Arc<AUTH>,
    team_service: Arc<TEAMS>,
    integration_service: Arc<INTEGRATIONS>,
    insight_service: Arc<INSIGHTS>,
    pulse_service: Arc<PULSE>,
    vault_service: Arc<VAULT>,
}

pub struct ApplicationParts<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT> {
    pub auth_service: AUTH,
    pub team_service: TEAMS,
    pub integration_service: INTEGRATIONS,
    pub insight_service: INSIGHTS,
    pub pulse_service: PULSE,
    pub vault_service: VAULT,
}

impl<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>
    Application<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>
where
    AUTH: AuthService + Send + Sync + 'static,
    TEAMS: TeamService + Send + Sync + 'static,
    INTEGRATIONS: IntegrationService + Send + Sync + 'static,
    INSIGHTS: InsightService + Send + Sync + 'static,
    PULSE: PulseService + Send + Sync + 'static,
    VAULT: VaultService + Send + Sync + 'static,
{
    pub fn new(
        config: Config,
        parts: ApplicationParts<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>,
    ) -> Self {
        Self {
            config,
            auth_service: Arc::new(parts.auth_service),
            team_service: Arc::new(parts.team_service),
            integration_service: Arc::new(parts.integration_service),
            insight_service: Arc::new(parts.insight_service),
            pulse_service: Arc::new(parts.pulse_service),
            vault_service: Arc::new(parts.vault_service),
        }
    }
}

impl<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT> Clone
    for Application<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>
where
    AUTH: AuthService + Send + Sync + 'static,
    TEAMS: TeamService + Send + Sync + 'static,
    INTEGRATIONS: IntegrationService + Send + Sync + 'static,
    INSIGHTS: InsightService + Send + Sync + 'static,
    PULSE: PulseService + Send + Sync + 'static,
    VAULT: VaultService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            auth_service: self.auth_service.clone(),
            team_service: self.team_service.clone(),
            integration_service: self.integration_service.clone(),
            insight_service: self.insight_service.clone(),
            pulse_service: self.pulse_service.clone(),
            vault_service: self.vault_service.clone(),
        }
    }
}

impl<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT> ApplicationServices
    for Application<AUTH, TEAMS, INTEGRATIONS, INSIGHTS, PULSE, VAULT>
where
    AUTH: AuthService + Send + Sync + 'static,
    TEAMS: TeamService + Send + Sync + 'static,
    INTEGRATIONS: IntegrationService + Send + Sync + 'static,
    INSIGHTS: InsightService + Send + Sync + 'static,
    PULSE: PulseService + Send + Sync + 'static,
    VAULT: VaultService + Send + Sync + 'static,
{
    type AUTH = AUTH;
    type TEAMS = TEAMS;
    type INTEGRATIONS = INTEGRATIONS;
    type INSIGHTS = INSIGHTS;
    type PULSE = PULSE;
    type VAULT = VAULT;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        self.auth_service.clone()
    }

    fn team_service(&self) -> Arc<Self::TEAMS> {
        self.team_service.clone()
    }

    fn integration_service(&self) -> Arc<Self::INTEGRATIONS> {
        self.integration_service.clone()
    }

    fn insight_service(&self) -> Arc<Self::INSIGHTS> {
        self.insight_service.clone()
    }

    fn pulse_service(&self) -> Arc<Self::PULSE> {
        self.pulse_service.clone()
    }

    fn vault_service(&self) -> Arc<Self::VAULT> {
        self.vault_service.clone()
    }
}
