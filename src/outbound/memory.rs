use crate::domain::insights::{
    CreateInsightDBParams, FindInsightDBParams, Insight, InsightRepository, InsightStatus,
    ListInsightsDBParams, UpdateInsightStatusDBParams,
};
use crate::domain::integrations::{
    CreateIntegrationDBParams, FindIntegrationByTypeDBParams, FindIntegrationDBParams,
    Integration, IntegrationRepository, ListIntegrationsDBParams, UpdateIntegrationDBParams,
    UpsertIntegrationDBParams,
};
use crate::domain::pulse::{
    CreatePulseDigestDBParams, CreateTeamMetricDBParams, FindLatestPulseDigestDBParams,
    FindPulseDigestDBParams, ListPulseDigestsDBParams, ListTeamMetricsDBParams, PulseDigest,
    PulseRepository, TeamMetric,
};
use crate::domain::teams::{
    CreateTeamDBParams, CreateTeamMemberDBParams, DeleteTeamMemberDBParams, EnsureUserDBParams,
    FindTeamDBParams, ListTeamsForUserDBParams, Team, TeamMember, TeamRepository, TeamRole,
    UpdateTeamDBParams,
};
use crate::domain::vault::{
    CreateEventDBParams, Event, EventRepository, FindEventDBParams, ListEventsDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: HashSet<String>,
    teams: Vec<Team>,
    team_members: Vec<TeamMember>,
    integrations: Vec<Integration>,
    insights: Vec<Insight>,
    events: Vec<Event>,
    pulse_digests: Vec<PulseDigest>,
    team_metrics: Vec<TeamMetric>,
}

impl Tables {
    /// Mirrors the foreign keys on `team_id`.
    fn require_team(&self, team_id: &str) -> Result<(), Error> {
        if self.teams.iter().any(|team| team.id == team_id) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }

    fn require_user(&self, user_id: &str) -> Result<(), Error> {
        if self.users.contains(user_id) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}

/// Process-local storage with the same keys and constraints as the Postgres schema.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

//------------------------------------------------------------------------------
// Teams
//------------------------------------------------------------------------------

#[async_trait]
impl TeamRepository for MemoryRepository {
    async fn ensure_user(&self, params: EnsureUserDBParams) -> Result<(), Error> {
        self.tables.write().await.users.insert(params.user_id);

        Ok(())
    }

    async fn create_team(&self, params: CreateTeamDBParams) -> Result<Team, Error> {
        let mut tables = self.tables.write().await;
        tables.require_user(&params.owner_id)?;

        let created_at = now();
        let team = Team {
            id: new_id(ids::TEAM),
            name: params.name,
            description: params.description,
            owner_id: params.owner_id,
            created_at,
            updated_at: created_at,
        };
        let owner = TeamMember {
            id: new_id(ids::TEAM_MEMBER),
            team_id: team.id.clone(),
            user_id: team.owner_id.clone(),
            role: TeamRole::Admin,
            created_at,
            updated_at: created_at,
        };

        tables.teams.push(team.clone());
        tables.team_members.push(owner);

        Ok(team)
    }

    async fn update_team(&self, params: UpdateTeamDBParams) -> Result<Option<Team>, Error> {
        let mut tables = self.tables.write().await;
        let Some(team) = tables.teams.iter_mut().find(|team| team.id == params.team_id) else {
            return Ok(None);
        };

        if let Some(name) = params.name {
            team.name = name;
        }
        if let Some(description) = params.description {
            team.description = description;
        }
        team.updated_at = now();

        Ok(Some(team.clone()))
    }

    async fn delete_team(&self, params: FindTeamDBParams) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.teams.len();
        tables.teams.retain(|team| team.id != params.team_id);
        if tables.teams.len() == before {
            return Ok(false);
        }

        let team_id = params.team_id.as_str();
        tables.team_members.retain(|m| m.team_id != team_id);
        tables.integrations.retain(|i| i.team_id != team_id);
        tables.insights.retain(|i| i.team_id != team_id);
        tables.events.retain(|e| e.team_id != team_id);
        tables.pulse_digests.retain(|d| d.team_id != team_id);
        tables.team_metrics.retain(|m| m.team_id != team_id);

        Ok(true)
    }

    async fn find_team_by_id(&self, params: FindTeamDBParams) -> Result<Option<Team>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .teams
            .iter()
            .find(|team| team.id == params.team_id)
            .cloned())
    }

    async fn list_teams_for_user(
        &self,
        params: ListTeamsForUserDBParams,
    ) -> Result<Vec<Team>, Error> {
        let tables = self.tables.read().await;
        let team_ids: HashSet<&str> = tables
            .team_members
            .iter()
            .filter(|m| m.user_id == params.user_id)
            .map(|m| m.team_id.as_str())
            .collect();

        Ok(tables
            .teams
            .iter()
            .filter(|team| team_ids.contains(team.id.as_str()))
            .cloned()
            .collect())
    }

    async fn create_team_member(
        &self,
        params: CreateTeamMemberDBParams,
    ) -> Result<TeamMember, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;
        tables.require_user(&params.user_id)?;

        if tables
            .team_members
            .iter()
            .any(|m| m.team_id == params.team_id && m.user_id == params.user_id)
        {
            return Err(Error::OnConflict);
        }

        let created_at = now();
        let member = TeamMember {
            id: new_id(ids::TEAM_MEMBER),
            team_id: params.team_id,
            user_id: params.user_id,
            role: params.role,
            created_at,
            updated_at: created_at,
        };
        tables.team_members.push(member.clone());

        Ok(member)
    }

    async fn list_team_members(&self, params: FindTeamDBParams) -> Result<Vec<TeamMember>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .team_members
            .iter()
            .filter(|m| m.team_id == params.team_id)
            .cloned()
            .collect())
    }

    async fn delete_team_member(&self, params: DeleteTeamMemberDBParams) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.team_members.len();
        tables
            .team_members
            .retain(|m| !(m.team_id == params.team_id && m.user_id == params.user_id));

        Ok(tables.team_members.len() < before)
    }
}

//------------------------------------------------------------------------------
// Integrations
//------------------------------------------------------------------------------

#[async_trait]
impl IntegrationRepository for MemoryRepository {
    async fn create_integration(
        &self,
        params: CreateIntegrationDBParams,
    ) -> Result<Integration, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;

        if tables.integrations.iter().any(|i| {
            i.team_id == params.team_id && i.integration_type == params.integration_type
        }) {
            return Err(Error::OnConflict);
        }

        let created_at = now();
        let integration = Integration {
            id: new_id(ids::INTEGRATION),
            team_id: params.team_id,
            integration_type: params.integration_type,
            name: params.name,
            config: params.config,
            active: params.active,
            created_at,
            updated_at: created_at,
        };
        tables.integrations.push(integration.clone());

        Ok(integration)
    }

    async fn find_integration_by_id(
        &self,
        params: FindIntegrationDBParams,
    ) -> Result<Option<Integration>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .integrations
            .iter()
            .find(|i| i.id == params.integration_id && i.team_id == params.team_id)
            .cloned())
    }

    async fn find_integration_by_team_and_type(
        &self,
        params: FindIntegrationByTypeDBParams,
    ) -> Result<Option<Integration>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .integrations
            .iter()
            .find(|i| i.team_id == params.team_id && i.integration_type == params.integration_type)
            .cloned())
    }

    async fn list_integrations_by_team(
        &self,
        params: ListIntegrationsDBParams,
    ) -> Result<Vec<Integration>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .integrations
            .iter()
            .filter(|i| i.team_id == params.team_id)
            .cloned()
            .collect())
    }

    async fn update_integration(
        &self,
        params: UpdateIntegrationDBParams,
    ) -> Result<Option<Integration>, Error> {
        let mut tables = self.tables.write().await;
        let Some(integration) = tables
            .integrations
            .iter_mut()
            .find(|i| i.id == params.integration_id && i.team_id == params.team_id)
        else {
            return Ok(None);
        };

        if let Some(name) = params.name {
            integration.name = name;
        }
        if let Some(active) = params.active {
            integration.active = active;
        }
        integration.updated_at = now();

        Ok(Some(integration.clone()))
    }

    async fn upsert_integration(
        &self,
        params: UpsertIntegrationDBParams,
    ) -> Result<Integration, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;

        if let Some(integration) = tables.integrations.iter_mut().find(|i| {
            i.team_id == params.team_id && i.integration_type == params.integration_type
        }) {
            integration.config = Some(params.config);
            integration.active = true;
            integration.updated_at = now();

            return Ok(integration.clone());
        }

        let created_at = now();
        let integration = Integration {
            id: new_id(ids::INTEGRATION),
            team_id: params.team_id,
            integration_type: params.integration_type,
            name: params.name,
            config: Some(params.config),
            active: true,
            created_at,
            updated_at: created_at,
        };
        tables.integrations.push(integration.clone());

        Ok(integration)
    }

    async fn delete_integration(&self, params: FindIntegrationDBParams) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.integrations.len();
        tables
            .integrations
            .retain(|i| !(i.id == params.integration_id && i.team_id == params.team_id));

        Ok(tables.integrations.len() < before)
    }
}

//------------------------------------------------------------------------------
// Insights
//------------------------------------------------------------------------------

#[async_trait]
impl InsightRepository for MemoryRepository {
    async fn create_insight(&self, params: CreateInsightDBParams) -> Result<Insight, Error> {
        let mut tables = self.tables.write().await;
        let new = params.insight;
        tables.require_team(&new.team_id)?;

        let created_at = now();
        let insight = Insight {
            id: new_id(ids::INSIGHT),
            team_id: new.team_id,
            title: new.title,
            description: new.description,
            insight_type: new.insight_type,
            priority: new.priority,
            source: new.source,
            status: new.status,
            data: new.data,
            created_at,
            updated_at: created_at,
        };
        tables.insights.push(insight.clone());

        Ok(insight)
    }

    async fn find_insight_by_id(
        &self,
        params: FindInsightDBParams,
    ) -> Result<Option<Insight>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .insights
            .iter()
            .find(|i| i.id == params.insight_id && i.team_id == params.team_id)
            .cloned())
    }

    async fn update_insight_status(
        &self,
        params: UpdateInsightStatusDBParams,
    ) -> Result<Option<Insight>, Error> {
        let mut tables = self.tables.write().await;
        let Some(insight) = tables
            .insights
            .iter_mut()
            .find(|i| i.id == params.insight_id && i.team_id == params.team_id)
        else {
            return Ok(None);
        };

        insight.status = params.status;
        insight.updated_at = now();

        Ok(Some(insight.clone()))
    }

    async fn delete_insight(&self, params: FindInsightDBParams) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.insights.len();
        tables
            .insights
            .retain(|i| !(i.id == params.insight_id && i.team_id == params.team_id));

        Ok(tables.insights.len() < before)
    }

    async fn list_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .insights
            .iter()
            .filter(|i| i.team_id == params.team_id)
            .cloned()
            .collect())
    }

    async fn list_active_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .insights
            .iter()
            .rev()
            .filter(|i| i.team_id == params.team_id && i.status == InsightStatus::Active)
            .cloned()
            .collect())
    }
}

//------------------------------------------------------------------------------
// Pulse
//------------------------------------------------------------------------------

#[async_trait]
impl PulseRepository for MemoryRepository {
    async fn create_pulse_digest(
        &self,
        params: CreatePulseDigestDBParams,
    ) -> Result<PulseDigest, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;

        let created_at = now();
        let digest = PulseDigest {
            id: new_id(ids::PULSE_DIGEST),
            team_id: params.team_id,
            date: params.date,
            digest_type: params.digest_type,
            insights: params.insights,
            metrics: params.metrics,
            created_at,
            updated_at: created_at,
        };
        tables.pulse_digests.push(digest.clone());

        Ok(digest)
    }

    async fn find_pulse_digest_by_id(
        &self,
        params: FindPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .pulse_digests
            .iter()
            .find(|d| d.id == params.digest_id)
            .cloned())
    }

    async fn list_pulse_digests_by_team(
        &self,
        params: ListPulseDigestsDBParams,
    ) -> Result<Vec<PulseDigest>, Error> {
        let tables = self.tables.read().await;
        let mut digests: Vec<PulseDigest> = tables
            .pulse_digests
            .iter()
            .rev()
            .filter(|d| d.team_id == params.team_id)
            .cloned()
            .collect();
        digests.sort_by_key(|d| Reverse(d.date));
        digests.truncate(params.limit as usize);

        Ok(digests)
    }

    async fn find_latest_pulse_digest(
        &self,
        params: FindLatestPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .pulse_digests
            .iter()
            .rev()
            .filter(|d| d.team_id == params.team_id && d.digest_type == params.digest_type)
            .min_by_key(|d| Reverse(d.date))
            .cloned())
    }

    async fn create_team_metric(
        &self,
        params: CreateTeamMetricDBParams,
    ) -> Result<TeamMetric, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;

        let created_at = now();
        let metric = TeamMetric {
            id: new_id(ids::TEAM_METRIC),
            team_id: params.team_id,
            date: params.date,
            scores: params.scores,
            data: params.data,
            created_at,
            updated_at: created_at,
        };
        tables.team_metrics.push(metric.clone());

        Ok(metric)
    }

    async fn list_team_metrics(
        &self,
        params: ListTeamMetricsDBParams,
    ) -> Result<Vec<TeamMetric>, Error> {
        let tables = self.tables.read().await;
        let mut metrics: Vec<TeamMetric> = tables
            .team_metrics
            .iter()
            .filter(|m| {
                m.team_id == params.team_id && m.date >= params.start && m.date <= params.end
            })
            .cloned()
            .collect();
        metrics.sort_by_key(|m| m.date);

        Ok(metrics)
    }
}

//------------------------------------------------------------------------------
// Vault
//------------------------------------------------------------------------------

#[async_trait]
impl EventRepository for MemoryRepository {
    async fn create_event(&self, params: CreateEventDBParams) -> Result<Event, Error> {
        let mut tables = self.tables.write().await;
        tables.require_team(&params.team_id)?;

        let created_at = now();
        let event = Event {
            id: new_id(ids::EVENT),
            team_id: params.team_id,
            event_type: params.event_type,
            title: params.title,
            description: params.description,
            date: params.date,
            tags: params.tags,
            data: params.data,
            created_at,
            updated_at: created_at,
        };
        tables.events.push(event.clone());

        Ok(event)
    }

    async fn find_event_by_id(&self, params: FindEventDBParams) -> Result<Option<Event>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .events
            .iter()
            .find(|e| e.id == params.event_id && e.team_id == params.team_id)
            .cloned())
    }

    async fn list_events_by_team(&self, params: ListEventsDBParams) -> Result<Vec<Event>, Error> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .events
            .iter()
            .rev()
            .filter(|e| e.team_id == params.team_id)
            .filter(|e| params.event_type.is_none_or(|t| e.event_type == t))
            .cloned()
            .collect();
        events.sort_by_key(|e| Reverse(e.date));

        Ok(events)
    }

    async fn delete_event(&self, params: FindEventDBParams) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.events.len();
        tables
            .events
            .retain(|e| !(e.id == params.event_id && e.team_id == params.team_id));

        Ok(tables.events.len() < before)
    }
}
