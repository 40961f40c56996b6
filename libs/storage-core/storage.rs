use std::sync::Arc;

use derive_more::Deref;
use serde::Serialize;
use tracing::trace;

use crate::{
    document::{to_field_map, Document, DocumentSnapshot},
    CollectionPath, FieldMap, PinFuture, Query, StorageError, StorageResult, WriteOp,
};

#[derive(Clone, Deref)]
#[deref(forward)]
pub struct StorageBox(Arc<dyn Storage>);

impl StorageBox {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self(Arc::new(storage))
    }
}

/// Document database collaborator. Every call is a remote round trip from the
/// caller's point of view, the store arbitrates its own consistency.
pub trait Storage: Send + Sync {
    fn debug_message(&self) -> String;

    fn init(&self) -> PinFuture<StorageResult<()>>;

    // Read every document of a collection matching the query predicates
    fn query(&self, query: Query) -> PinFuture<StorageResult<Vec<DocumentSnapshot>>>;

    // Get a document by id
    fn get(
        &self,
        collection: CollectionPath,
        document_id: String,
    ) -> PinFuture<StorageResult<Option<DocumentSnapshot>>>;

    /// Create a document and return its id; an id is generated when none is given
    fn create(
        &self,
        collection: CollectionPath,
        document_id: Option<String>,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<String>>;

    /// Merge `fields` into an existing document
    fn update(
        &self,
        collection: CollectionPath,
        document_id: String,
        fields: FieldMap,
    ) -> PinFuture<StorageResult<()>>;

    fn supports_batch(&self) -> bool {
        false
    }

    /// Apply every write or none of them, returns the id of each written document
    fn commit_batch(&self, writes: Vec<WriteOp>) -> PinFuture<StorageResult<Vec<String>>> {
        let count = writes.len();
        Box::pin(async move {
            Err(StorageError::Unsupported(format!(
                "batch of {count} writes"
            )))
        })
    }
}

impl StorageBox {
    pub async fn query_documents<T: Document>(&self, query: Query) -> StorageResult<Vec<T>> {
        trace!(collection = %query.collection, "Query documents");
        self.query(query)
            .await?
            .iter()
            .map(DocumentSnapshot::to_document::<T>)
            .collect()
    }

    pub async fn get_document<T: Document>(
        &self,
        collection: &CollectionPath,
        document_id: &str,
    ) -> StorageResult<Option<T>> {
        trace!(%collection, document_id, "Get document");
        self.get(collection.clone(), document_id.to_string())
            .await?
            .map(|snapshot| snapshot.to_document::<T>())
            .transpose()
    }

    /// Create a typed document, its id is kept when not empty
    pub async fn create_document<T: Document>(
        &self,
        collection: &CollectionPath,
        document: &T,
    ) -> StorageResult<String> {
        let snapshot = DocumentSnapshot::from_document(document)?;
        let document_id = Some(snapshot.id).filter(|id| !id.is_empty());
        trace!(%collection, ?document_id, "Create document");
        self.create(collection.clone(), document_id, snapshot.fields)
            .await
    }

    /// Write the serialized fields of `update`, usually a sparse update struct
    pub async fn update_fields<U: Serialize + ?Sized>(
        &self,
        collection: &CollectionPath,
        document_id: &str,
        update: &U,
    ) -> StorageResult<()> {
        let fields = to_field_map(update)?;
        trace!(%collection, document_id, fields = ?fields.keys().collect::<Vec<_>>(), "Update document");
        self.update(collection.clone(), document_id.to_string(), fields)
            .await
    }
}
