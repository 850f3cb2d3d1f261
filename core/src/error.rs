use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayoffError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Projection '{projection_id}' not found")]
    ProjectionNotFound { projection_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PayoffResult<T> = Result<T, PayoffError>;
