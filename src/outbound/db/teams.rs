use crate::domain::teams::{
    CreateTeamDBParams, CreateTeamMemberDBParams, DeleteTeamMemberDBParams, EnsureUserDBParams,
    FindTeamDBParams, ListTeamsForUserDBParams, Team, TeamMember, TeamRepository, TeamRole,
    UpdateTeamDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{TeamMemberRow, TeamRow, decode_rows};
use crate::outbound::db::repository::Repository;
use crate::outbound::ids::{self, new_id};
use async_trait::async_trait;

#[async_trait]
impl TeamRepository for Repository {
    async fn ensure_user(&self, params: EnsureUserDBParams) -> Result<(), Error> {
        sqlx::query("insert into users (user_id) values ($1) on conflict (user_id) do nothing")
            .bind(params.user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_team(&self, params: CreateTeamDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, TeamRow>(
            r#"
insert into teams (id, name, description, owner_id)
values ($1, $2, $3, $4)
returning *
"#,
        )
        .bind(new_id(ids::TEAM))
        .bind(params.name)
        .bind(params.description)
        .bind(&params.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::from_sqlx)?;

        sqlx::query(
            "insert into team_members (id, team_id, user_id, role) values ($1, $2, $3, $4)",
        )
        .bind(new_id(ids::TEAM_MEMBER))
        .bind(&team.id)
        .bind(&params.owner_id)
        .bind(TeamRole::Admin.as_str())
        .execute(&mut *tx)
        .await
        .map_err(Error::from_sqlx)?;

        tx.commit().await?;

        Ok(team.into())
    }

    async fn update_team(&self, params: UpdateTeamDBParams) -> Result<Option<Team>, Error> {
        let set_description = params.description.is_some();

        let result = sqlx::query_as::<_, TeamRow>(
            r#"
update teams
set
    name = coalesce($2, name),
    description = case when $3 then $4 else description end,
    updated_at = now()
where id = $1
returning *
"#,
        )
        .bind(params.team_id)
        .bind(params.name)
        .bind(set_description)
        .bind(params.description.flatten())
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn delete_team(&self, params: FindTeamDBParams) -> Result<bool, Error> {
        let result = sqlx::query("delete from teams where id = $1")
            .bind(params.team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_team_by_id(&self, params: FindTeamDBParams) -> Result<Option<Team>, Error> {
        let result = sqlx::query_as::<_, TeamRow>("select t.* from teams t where t.id = $1")
            .bind(params.team_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn list_teams_for_user(
        &self,
        params: ListTeamsForUserDBParams,
    ) -> Result<Vec<Team>, Error> {
        let result = sqlx::query_as::<_, TeamRow>(
            r#"
select
    t.*
from teams t
join team_members m on m.team_id = t.id
where m.user_id = $1
order by t.created_at
"#,
        )
        .bind(params.user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result.into_iter().map(|row| row.into()).collect())
    }

    async fn create_team_member(
        &self,
        params: CreateTeamMemberDBParams,
    ) -> Result<TeamMember, Error> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            r#"
insert into team_members (id, team_id, user_id, role)
values ($1, $2, $3, $4)
returning *
"#,
        )
        .bind(new_id(ids::TEAM_MEMBER))
        .bind(params.team_id)
        .bind(params.user_id)
        .bind(params.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        row.try_into()
    }

    async fn list_team_members(&self, params: FindTeamDBParams) -> Result<Vec<TeamMember>, Error> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(
            "select m.* from team_members m where m.team_id = $1 order by m.created_at",
        )
        .bind(params.team_id)
        .fetch_all(&self.pool)
        .await?;

        decode_rows(rows)
    }

    async fn delete_team_member(&self, params: DeleteTeamMemberDBParams) -> Result<bool, Error> {
        let result = sqlx::query("delete from team_members where team_id = $1 and user_id = $2")
            .bind(params.team_id)
            .bind(params.user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
