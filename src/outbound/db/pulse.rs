use crate::domain::pulse::{
    CreatePulseDigestDBParams, CreateTeamMetricDBParams, FindLatestPulseDigestDBParams,
    FindPulseDigestDBParams, ListPulseDigestsDBParams, ListTeamMetricsDBParams, PulseDigest,
    PulseRepository, TeamMetric,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{PulseDigestRow, TeamMetricRow, decode_rows};
use crate::outbound::db::repository::Repository;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;
use sqlx::types::Json;

#[async_trait]
impl PulseRepository for Repository {
    async fn create_pulse_digest(
        &self,
        params: CreatePulseDigestDBParams,
    ) -> Result<PulseDigest, Error> {
        let row = sqlx::query_as::<_, PulseDigestRow>(
            r#"
insert into pulse_digests (id, team_id, date, type, insights, metrics)
values ($1, $2, $3, $4, $5, $6)
returning *
"#,
        )
        .bind(new_id(ids::PULSE_DIGEST))
        .bind(params.team_id)
        .bind(params.date)
        .bind(params.digest_type.as_str())
        .bind(Json(params.insights))
        .bind(Json(params.metrics))
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn find_pulse_digest_by_id(
        &self,
        params: FindPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, Error> {
        sqlx::query_as::<_, PulseDigestRow>("select d.* from pulse_digests d where d.id = $1")
            .bind(params.digest_id)
            .fetch_optional(&self.pool)
            .await?
            .map(PulseDigest::try_from)
            .transpose()
    }

    async fn list_pulse_digests_by_team(
        &self,
        params: ListPulseDigestsDBParams,
    ) -> Result<Vec<PulseDigest>, Error> {
        let rows = sqlx::query_as::<_, PulseDigestRow>(
            r#"
select
    d.*
from pulse_digests d
where d.team_id = $1
order by d.date desc, d.created_at desc
limit $2
"#,
        )
        .bind(params.team_id)
        .bind(i64::from(params.limit))
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }

    async fn find_latest_pulse_digest(
        &self,
        params: FindLatestPulseDigestDBParams,
    ) -> Result<Option<PulseDigest>, Error> {
        sqlx::query_as::<_, PulseDigestRow>(
            r#"
select
    d.*
from pulse_digests d
where d.team_id = $1 and d.type = $2
order by d.date desc, d.created_at desc
limit 1
"#,
        )
        .bind(params.team_id)
        .bind(params.digest_type.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(PulseDigest::try_from)
        .transpose()
    }

    async fn create_team_metric(
        &self,
        params: CreateTeamMetricDBParams,
    ) -> Result<TeamMetric, Error> {
        let row = sqlx::query_as::<_, TeamMetricRow>(
            r#"
insert into team_metrics (
    id, team_id, date,
    collaboration_score, productivity_score, morale_score, wellness_score,
    data
)
values ($1, $2, $3, $4, $5, $6, $7, $8)
returning *
"#,
        )
        .bind(new_id(ids::TEAM_METRIC))
        .bind(params.team_id)
        .bind(params.date)
        .bind(params.scores.collaboration)
        .bind(params.scores.productivity)
        .bind(params.scores.morale)
        .bind(params.scores.wellness)
        .bind(params.data.map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn list_team_metrics(
        &self,
        params: ListTeamMetricsDBParams,
    ) -> Result<Vec<TeamMetric>, Error> {
        let rows = sqlx::query_as::<_, TeamMetricRow>(
            r#"
select
    m.*
from team_metrics m
where m.team_id = $1 and m.date between $2 and $3
order by m.date, m.created_at
"#,
        )
        .bind(params.team_id)
        .bind(params.start)
        .bind(params.end)
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }
}
