use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common budgeting-core failures.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("paycheck {0} is already initialized")]
    AlreadyInitialized(Uuid),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
