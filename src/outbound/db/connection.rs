use crate::core::config::DB;
use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;

pub async fn connect(config: &DB) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(host = %config.host, database = %config.database, "connecting to postgres");

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.connection_string().as_str())
        .await
}

/// Applies the migrations embedded from `./migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
