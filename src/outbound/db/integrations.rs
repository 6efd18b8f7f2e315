use crate::domain::integrations::{
    CreateIntegrationDBParams, FindIntegrationByTypeDBParams, FindIntegrationDBParams,
    Integration, IntegrationConfig, IntegrationRepository, ListIntegrationsDBParams,
    UpdateIntegrationDBParams, UpsertIntegrationDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{IntegrationRow, decode_rows};
use crate::outbound::db::repository::Repository;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;
use sqlx::types::Json;

fn config_json(config: Option<IntegrationConfig>) -> Option<Json<IntegrationConfig>> {
    config.map(Json)
}

#[async_trait]
impl IntegrationRepository for Repository {
    async fn create_integration(
        &self,
        params: CreateIntegrationDBParams,
    ) -> Result<Integration, Error> {
        let row = sqlx::query_as::<_, IntegrationRow>(
            r#"
insert into integrations (id, team_id, type, name, config, active)
values ($1, $2, $3, $4, $5, $6)
returning *
"#,
        )
        .bind(new_id(ids::INTEGRATION))
        .bind(params.team_id)
        .bind(params.integration_type.as_str())
        .bind(params.name)
        .bind(config_json(params.config))
        .bind(params.active)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn find_integration_by_id(
        &self,
        params: FindIntegrationDBParams,
    ) -> Result<Option<Integration>, Error> {
        sqlx::query_as::<_, IntegrationRow>(
            "select i.* from integrations i where i.id = $1 and i.team_id = $2",
        )
        .bind(params.integration_id)
        .bind(params.team_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Integration::try_from)
        .transpose()
    }

    async fn find_integration_by_team_and_type(
        &self,
        params: FindIntegrationByTypeDBParams,
    ) -> Result<Option<Integration>, Error> {
        sqlx::query_as::<_, IntegrationRow>(
            "select i.* from integrations i where i.team_id = $1 and i.type = $2",
        )
        .bind(params.team_id)
        .bind(params.integration_type.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Integration::try_from)
        .transpose()
    }

    async fn list_integrations_by_team(
        &self,
        params: ListIntegrationsDBParams,
    ) -> Result<Vec<Integration>, Error> {
        let rows = sqlx::query_as::<_, IntegrationRow>(
            "select i.* from integrations i where i.team_id = $1 order by i.created_at",
        )
        .bind(params.team_id)
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }

    async fn update_integration(
        &self,
        params: UpdateIntegrationDBParams,
    ) -> Result<Option<Integration>, Error> {
        sqlx::query_as::<_, IntegrationRow>(
            r#"
update integrations
set
    name = coalesce($3, name),
    active = coalesce($4, active),
    updated_at = now()
where id = $1 and team_id = $2
returning *
"#,
        )
        .bind(params.integration_id)
        .bind(params.team_id)
        .bind(params.name)
        .bind(params.active)
        .fetch_optional(&self.pool)
        .await?
        .map(Integration::try_from)
        .transpose()
    }

    async fn upsert_integration(
        &self,
        params: UpsertIntegrationDBParams,
    ) -> Result<Integration, Error> {
        let row = sqlx::query_as::<_, IntegrationRow>(
            r#"
insert into integrations (id, team_id, type, name, config, active)
values ($1, $2, $3, $4, $5, true)
on conflict (team_id, type) do update
set
    config = excluded.config,
    active = true,
    updated_at = now()
returning *
"#,
        )
        .bind(new_id(ids::INTEGRATION))
        .bind(params.team_id)
        .bind(params.integration_type.as_str())
        .bind(params.name)
        .bind(Json(params.config))
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn delete_integration(&self, params: FindIntegrationDBParams) -> Result<bool, Error> {
        let result = sqlx::query("delete from integrations where id = $1 and team_id = $2")
            .bind(params.integration_id)
            .bind(params.team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
