use thiserror::Error;

/// Errors from the habit store.
///
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("Can not open database {path}: {source}")]
    Open {
        path: String,
        source: duckdb::Error,
    },
    #[error(transparent)]
    Database(#[from] duckdb::Error),
}
