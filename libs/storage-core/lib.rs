use std::{future::Future, pin::Pin};

mod batch;
mod document;
mod error;
mod query;
mod storage;
mod storage_config;

pub use batch::WriteOp;
pub use document::{to_field_map, Document, DocumentSnapshot};
pub use error::{StorageError, StorageResult};
pub use query::{CollectionPath, Predicate, Query};
pub use storage::{Storage, StorageBox};
pub use storage_config::StorageConfig;

pub type PinFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Raw content of a document, the id is kept outside of it
pub type FieldMap = serde_json::Map<String, serde_json::Value>;
