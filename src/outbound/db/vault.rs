use crate::domain::vault::{
    CreateEventDBParams, Event, EventRepository, FindEventDBParams, ListEventsDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{EventRow, decode_rows};
use crate::outbound::db::repository::Repository;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;

#[async_trait]
impl EventRepository for Repository {
    async fn create_event(&self, params: CreateEventDBParams) -> Result<Event, Error> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
insert into events (id, team_id, type, title, description, date, tags, data)
values ($1, $2, $3, $4, $5, $6, $7, $8)
returning *
"#,
        )
        .bind(new_id(ids::EVENT))
        .bind(params.team_id)
        .bind(params.event_type.as_str())
        .bind(params.title)
        .bind(params.description)
        .bind(params.date)
        .bind(params.tags)
        .bind(params.data)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn find_event_by_id(&self, params: FindEventDBParams) -> Result<Option<Event>, Error> {
        sqlx::query_as::<_, EventRow>("select e.* from events e where e.id = $1 and e.team_id = $2")
            .bind(params.event_id)
            .bind(params.team_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    async fn list_events_by_team(&self, params: ListEventsDBParams) -> Result<Vec<Event>, Error> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
select
    e.*
from events e
where e.team_id = $1 and ($2::text is null or e.type = $2)
order by e.date desc, e.created_at desc
"#,
        )
        .bind(params.team_id)
        .bind(params.event_type.map(|event_type| event_type.as_str()))
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }

    async fn delete_event(&self, params: FindEventDBParams) -> Result<bool, Error> {
        let result = sqlx::query("delete from events where id = $1 and team_id = $2")
            .bind(params.event_id)
            .bind(params.team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
