use crate::domain::insights::{
    CreateInsightDBParams, FindInsightDBParams, Insight, InsightRepository, InsightStatus,
    ListInsightsDBParams, UpdateInsightStatusDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{InsightRow, decode_rows};
use crate::outbound::db::repository::Repository;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;
use sqlx::types::Json;

#[async_trait]
impl InsightRepository for Repository {
    async fn create_insight(&self, params: CreateInsightDBParams) -> Result<Insight, Error> {
        let insight = params.insight;
        let row = sqlx::query_as::<_, InsightRow>(
            r#"
insert into insights (id, team_id, title, description, type, priority, source, status, data)
values ($1, $2, $3, $4, $5, $6, $7, $8, $9)
returning *
"#,
        )
        .bind(new_id(ids::INSIGHT))
        .bind(insight.team_id)
        .bind(insight.title)
        .bind(insight.description)
        .bind(insight.insight_type.as_str())
        .bind(insight.priority.as_str())
        .bind(insight.source.as_str())
        .bind(insight.status.as_str())
        .bind(insight.data.map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn find_insight_by_id(
        &self,
        params: FindInsightDBParams,
    ) -> Result<Option<Insight>, Error> {
        sqlx::query_as::<_, InsightRow>(
            "select i.* from insights i where i.id = $1 and i.team_id = $2",
        )
        .bind(params.insight_id)
        .bind(params.team_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Insight::try_from)
        .transpose()
    }

    async fn update_insight_status(
        &self,
        params: UpdateInsightStatusDBParams,
    ) -> Result<Option<Insight>, Error> {
        sqlx::query_as::<_, InsightRow>(
            r#"
update insights
set status = $3, updated_at = now()
where id = $1 and team_id = $2
returning *
"#,
        )
        .bind(params.insight_id)
        .bind(params.team_id)
        .bind(params.status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Insight::try_from)
        .transpose()
    }

    async fn delete_insight(&self, params: FindInsightDBParams) -> Result<bool, Error> {
        let result = sqlx::query("delete from insights where id = $1 and team_id = $2")
            .bind(params.insight_id)
            .bind(params.team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, Error> {
        let rows = sqlx::query_as::<_, InsightRow>(
            "select i.* from insights i where i.team_id = $1 order by i.created_at, i.id",
        )
        .bind(params.team_id)
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }

    async fn list_active_insights_by_team(
        &self,
        params: ListInsightsDBParams,
    ) -> Result<Vec<Insight>, Error> {
        let rows = sqlx::query_as::<_, InsightRow>(
            r#"
select
    i.*
from insights i
where i.team_id = $1 and i.status = $2
order by i.created_at desc, i.id desc
"#,
        )
        .bind(params.team_id)
        .bind(InsightStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }
}
