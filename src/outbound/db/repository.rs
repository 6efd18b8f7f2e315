use sqlx::PgPool;

/// Postgres adapter for every repository port. Implementations live next to their tables.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
