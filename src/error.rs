use thiserror::Error;

/// Errors surfaced by the service layer
///
/// Store failures pass through untouched in `Store`; the remaining variants
/// are the few conditions the service itself detects.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} has not been persisted yet")]
    Transient { entity: &'static str },

    #[error("{entity} is already persisted with id {id}")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// True when the store rejected a write on a constraint (FK, NOT NULL, ...)
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            ServiceError::Store(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
