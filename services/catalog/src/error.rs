use serde_json::{Value, json};
use sqlx::error::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SongError {
    #[error("song validation failed: {0}")]
    Validation(String),

    #[error("invalid song id: {0}")]
    InvalidId(String),

    #[error("no song with id {0}")]
    NotFound(Uuid),

    #[error("store unavailable: {0}")]
    Connectivity(String),
}

impl SongError {
    pub fn name(&self) -> &'static str {
        match self {
            SongError::Validation(_) => "ValidationError",
            SongError::InvalidId(_) => "InvalidIdError",
            SongError::NotFound(_) => "NotFoundError",
            SongError::Connectivity(_) => "StoreConnectivityError",
        }
    }

    /// Client-caused failures, as opposed to the store being unreachable.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SongError::Connectivity(_))
    }

    /// The `error` member of an error response body.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name(),
            "message": self.to_string(),
        })
    }
}

impl From<sqlx::Error> for SongError {
    fn from(err: sqlx::Error) -> Self {
        // The songs table carries CHECK constraints on every text column
        match err.as_database_error() {
            Some(db_err)
                if matches!(
                    db_err.kind(),
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation
                ) =>
            {
                SongError::Validation(db_err.message().to_string())
            }
            _ => SongError::Connectivity(err.to_string()),
        }
    }
}

pub fn parse_song_id(raw: &str) -> Result<Uuid, SongError> {
    Uuid::parse_str(raw).map_err(|_| SongError::InvalidId(raw.to_string()))
}
