use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error with sqlx")]
    DatabaseError(#[from] sqlx::Error),

    #[error("the resource could not be found")]
    NotFound,

    #[error("the resource already exists")]
    OnConflict,

    #[error("stored row could not be decoded: {0}")]
    InvalidRow(String),
}

impl Error {
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(database_error) = err.as_database_error() {
            if database_error.is_unique_violation() {
                return Error::OnConflict;
            }
            // The referenced team or user row is missing.
            if database_error.is_foreign_key_violation() {
                return Error::NotFound;
            }
        }

        Error::DatabaseError(err)
    }
}
