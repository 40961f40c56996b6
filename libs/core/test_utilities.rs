use bizdir_storage::{
    storage::in_memory::{InMemoryStorage, InMemoryStorageConfig},
    CollectionPath, DocumentSnapshot, FieldMap, PinFuture, Query, Storage, StorageBox,
    StorageError, StorageResult,
};
use typed_builder::TypedBuilder;

use crate::entities::{business::businesses_collection, BusinessRecord, BusinessStatus};

pub fn business(id: &str, name: &str, owner: &str, status: BusinessStatus) -> BusinessRecord {
    BusinessRecord::builder()
        .id(id)
        .name(name)
        .category("Services")
        .status(status)
        .owner_id(owner)
        .build()
}

pub async fn seed(storage: &StorageBox, records: Vec<BusinessRecord>) {
    for record in records {
        storage
            .create_document(&businesses_collection(), &record)
            .await
            .unwrap();
    }
}

/// In-memory storage without batch support that fails on demand
#[derive(TypedBuilder)]
pub struct FlakyStorage {
    #[builder(default = InMemoryStorage::new(InMemoryStorageConfig { disable_batch: true }))]
    inner: InMemoryStorage,
    #[builder(default)]
    fail_queries: bool,
    /// Creating a document assigned to one of these identities fails
    #[builder(default)]
    fail_creates_for: Vec<String>,
}

impl FlakyStorage {
    pub fn boxed(self) -> StorageBox {
        StorageBox::new(self)
    }
}

impl Storage for FlakyStorage {
    fn debug_message(&self) -> String {
        "Flaky storage".to_string()
    }

    fn init(&self) -> PinFuture<StorageResult<()>> {
        self.inner.init()
    }

    fn query(&self, query: Query) -> PinFuture<StorageResult<Vec<DocumentSnapshot>>> {
        if self.fail_queries {
            return Box::pin(async { Err(StorageError::OperationFailed("network down".into())) });
        }
        self.inner.query(query)
    }

    fn get(
        &self,
        collection: CollectionPath,
        document_id: String,
    ) -> PinFuture<StorageResult<Option<DocumentSnapshot>>> {
        self.inner.get(collection, document_id)
    }

    fn create(
        &self,
        collection: CollectionPath,
        document_id: Option<String>,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<String>> {
        let assignee = fields.get("assigned_to").and_then(|v| v.as_str());
        if assignee.is_some_and(|a| self.fail_creates_for.iter().any(|f| f == a)) {
            return Box::pin(async { Err(StorageError::OperationFailed("write rejected".into())) });
        }
        self.inner.create(collection, document_id, fields)
    }

    fn update(
        &self,
        collection: CollectionPath,
        document_id: String,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<()>> {
        self.inner.update(collection, document_id, fields)
    }
}
