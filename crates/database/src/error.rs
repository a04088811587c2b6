use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database URL: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A write broke a foreign-key, check or uniqueness constraint.
    #[error("Integrity constraint violated: {0}")]
    IntegrityViolation(String),
}

impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let Some(db_error) = error.as_database_error() {
            let is_constraint = matches!(
                db_error.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
            ) || db_error.message().contains("constraint failed");
            if is_constraint {
                return DbError::IntegrityViolation(db_error.message().to_string());
            }
        }
        DbError::QueryError(error)
    }
}
