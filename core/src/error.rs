use thiserror::Error;

#[derive(Error, Debug)]
pub enum WheelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("A spin is already in progress")]
    SpinInProgress,
}

pub type WheelResult<T> = Result<T, WheelError>;
