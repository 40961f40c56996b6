use std::{
    collections::{BTreeMap, HashMap},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde_derive::Deserialize;
use tracing::{instrument, trace};
use ulid::Ulid;

use crate::{
    CollectionPath, DocumentSnapshot, FieldMap, PinFuture, Query, Storage, StorageBox,
    StorageConfig, StorageError, StorageResult, WriteOp,
};

type Collections = HashMap<CollectionPath, BTreeMap<String, FieldMap>>;

/// This storage type is used for testing, data is not persisted to disk but
/// only present in memory. Documents of a collection are returned ordered by id.
pub struct InMemoryStorage {
    config: InMemoryStorageConfig,
    collections: RwLock<Collections>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct InMemoryStorageConfig {
    /// Refuse batch writes, callers fall back to independent writes
    #[serde(default)]
    pub disable_batch: bool,
}

impl StorageConfig for InMemoryStorageConfig {
    fn try_into_storage(self) -> eyre::Result<StorageBox> {
        Ok(StorageBox::new(InMemoryStorage::new(self)))
    }
}

impl InMemoryStorage {
    pub fn new(config: InMemoryStorageConfig) -> Self {
        InMemoryStorage {
            config,
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(StorageError::operation_failed)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(StorageError::operation_failed)
    }
}

fn apply_create(
    collections: &mut Collections,
    collection: CollectionPath,
    document_id: Option<String>,
    fields: FieldMap,
) -> StorageResult<String> {
    let documents = collections.entry(collection.clone()).or_default();
    let id = document_id.unwrap_or_else(|| Ulid::new().to_string());

    if documents.contains_key(&id) {
        return Err(StorageError::already_exists(collection, id));
    }

    documents.insert(id.clone(), fields);
    Ok(id)
}

fn apply_update(
    collections: &mut Collections,
    collection: &CollectionPath,
    document_id: &str,
    fields: FieldMap,
) -> StorageResult<()> {
    let document = collections
        .get_mut(collection)
        .and_then(|documents| documents.get_mut(document_id))
        .ok_or_else(|| StorageError::not_found(collection, document_id))?;

    document.extend(fields);
    Ok(())
}

impl Storage for InMemoryStorage {
    fn debug_message(&self) -> String {
        "In memory storage".to_string()
    }

    fn init(&self) -> PinFuture<StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    #[instrument(skip(self))]
    fn query(&self, query: Query) -> PinFuture<StorageResult<Vec<DocumentSnapshot>>> {
        Box::pin(async move {
            let collections = self.read()?;
            let documents = collections
                .get(&query.collection)
                .map(|documents| {
                    documents
                        .iter()
                        .filter(|(_, fields)| query.matches(fields))
                        .map(|(id, fields)| DocumentSnapshot::new(id.clone(), fields.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            trace!(count = documents.len(), "Query done");
            Ok(documents)
        })
    }

    #[instrument(skip(self))]
    fn get(
        &self,
        collection: CollectionPath,
        document_id: String,
    ) -> PinFuture<StorageResult<Option<DocumentSnapshot>>> {
        Box::pin(async move {
            let collections = self.read()?;
            Ok(collections
                .get(&collection)
                .and_then(|documents| documents.get(&document_id))
                .map(|fields| DocumentSnapshot::new(document_id.clone(), fields.clone())))
        })
    }

    #[instrument(skip(self, fields))]
    fn create(
        &self,
        collection: CollectionPath,
        document_id: Option<String>,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<String>> {
        Box::pin(async move {
            let mut collections = self.write()?;
            apply_create(&mut collections, collection, document_id, fields)
        })
    }

    #[instrument(skip(self, fields))]
    fn update(
        &self,
        collection: CollectionPath,
        document_id: String,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<()>> {
        Box::pin(async move {
            let mut collections = self.write()?;
            apply_update(&mut collections, &collection, &document_id, fields)
        })
    }

    fn supports_batch(&self) -> bool {
        !self.config.disable_batch
    }

    #[instrument(skip(self, writes), fields(count = writes.len()))]
    fn commit_batch(&self, writes: Vec<WriteOp>) -> PinFuture<StorageResult<Vec<String>>> {
        Box::pin(async move {
            if self.config.disable_batch {
                return Err(StorageError::Unsupported(format!(
                    "batch of {} writes",
                    writes.len()
                )));
            }

            let mut collections = self.write()?;
            // Writes are applied on a copy which replaces the store only once
            // every write succeeded.
            let mut staged = collections.clone();
            let mut ids = Vec::with_capacity(writes.len());

            for write in writes {
                let id = match write {
                    WriteOp::Create {
                        collection,
                        document_id,
                        fields,
                    } => apply_create(&mut staged, collection, document_id, fields)?,
                    WriteOp::Update {
                        collection,
                        document_id,
                        fields,
                    } => {
                        apply_update(&mut staged, &collection, &document_id, fields)?;
                        document_id
                    }
                };
                ids.push(id);
            }

            *collections = staged;
            Ok(ids)
        })
    }
}
