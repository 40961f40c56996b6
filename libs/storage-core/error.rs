use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },
    #[error("document '{id}' already exists in '{collection}'")]
    AlreadyExists { collection: String, id: String },
    #[error("couldn't parse store document: {0}")]
    CorruptedDocument(String),
    #[error("couldn't serialize document: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

impl StorageError {
    pub fn corrupted_document<E: Display>(e: E) -> Self {
        Self::CorruptedDocument(e.to_string())
    }

    pub fn serialization<E: Display>(e: E) -> Self {
        Self::Serialization(e.to_string())
    }

    pub fn operation_failed<E: Display>(e: E) -> Self {
        Self::OperationFailed(e.to_string())
    }

    pub fn not_found(collection: impl Display, id: impl Display) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: impl Display, id: impl Display) -> Self {
        Self::AlreadyExists {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
