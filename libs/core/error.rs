use bizdir_storage::StorageError;
use thiserror::Error;

use crate::directory::role::Role;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("you need to be signed in to {0}")]
    Unauthenticated(&'static str),
    #[error("a business {role} is not allowed to {action}")]
    NotPermitted { role: Role, action: &'static str },
    #[error("'{id}' was not found in '{collection}'")]
    NotFound { collection: String, id: String },
    #[error("cannot {action} a task that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: crate::entities::TaskStatus,
    },
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CoreError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Storage(other),
        }
    }
}

pub type CoreResult<T> = core::result::Result<T, CoreError>;
