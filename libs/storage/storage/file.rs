use std::path::PathBuf;

use serde_derive::Deserialize;
use tokio::sync::Mutex;
use tracing::{instrument, trace};
use ulid::Ulid;

use crate::{
    document_parser::{DocumentParser, FileFormatType},
    utils::files,
    CollectionPath, DocumentSnapshot, FieldMap, PinFuture, Query, Storage, StorageBox,
    StorageConfig, StorageError, StorageResult,
};

/// Save every document as a file, `<root>/<collection path>/<id>.<ext>`.
///
/// Writes are serialized inside the process; the store has no batch support.
pub struct FileStorage {
    root: PathBuf,
    document_parser: DocumentParser,
    write_lock: Mutex<()>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileStorageConfig {
    /// Root directory of the documents
    pub storage_location: Option<PathBuf>,

    /// Storage format of the files (default to: json)
    pub file_format: Option<String>,
}

impl FileStorageConfig {
    pub fn get_file_format_type(&self) -> eyre::Result<FileFormatType> {
        self.file_format
            .as_deref()
            .map(FileFormatType::try_from_str_lowercase)
            .unwrap_or(Ok(FileFormatType::Json))
    }
}

impl StorageConfig for FileStorageConfig {
    fn try_into_storage(self) -> eyre::Result<StorageBox> {
        let document_parser = self.get_file_format_type()?.parser();
        let root = self
            .storage_location
            .ok_or_else(|| eyre::eyre!("file storage requires a storage location"))?;

        Ok(StorageBox::new(FileStorage::new(root, document_parser)))
    }
}

impl FileStorage {
    pub fn new(root: PathBuf, document_parser: DocumentParser) -> Self {
        Self {
            root,
            document_parser,
            write_lock: Mutex::new(()),
        }
    }

    fn collection_dir(&self, collection: &CollectionPath) -> PathBuf {
        collection
            .segments()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn document_path(&self, collection: &CollectionPath, document_id: &str) -> PathBuf {
        let mut path = self.collection_dir(collection).join(document_id);
        files::add_file_extension(&mut path, self.document_parser.file_extension());
        path
    }

    async fn read_document(
        &self,
        collection: &CollectionPath,
        document_id: &str,
    ) -> StorageResult<Option<FieldMap>> {
        let path = self.document_path(collection, document_id);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let fields = self
            .document_parser
            .deserialize(&contents)
            .map_err(|e| StorageError::corrupted_document(format!("{path:?}: {e}")))?;
        Ok(Some(fields))
    }

    async fn write_document(
        &self,
        collection: &CollectionPath,
        document_id: &str,
        fields: &FieldMap,
    ) -> StorageResult<()> {
        let path = self.document_path(collection, document_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let serialized = self
            .document_parser
            .serialize(fields)
            .map_err(StorageError::serialization)?;
        tokio::fs::write(path, serialized.as_bytes()).await?;
        Ok(())
    }
}

/// Ids end up as file names
fn check_document_id(document_id: &str) -> StorageResult<()> {
    let valid = !document_id.is_empty()
        && document_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::OperationFailed(format!(
            "invalid document id '{document_id}'"
        )))
    }
}

impl Storage for FileStorage {
    fn debug_message(&self) -> String {
        format!(
            "File storage at {:?} ({})",
            self.root,
            self.document_parser.file_extension()
        )
    }

    fn init(&self) -> PinFuture<StorageResult<()>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&self.root).await?;
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn query(&self, query: Query) -> PinFuture<StorageResult<Vec<DocumentSnapshot>>> {
        Box::pin(async move {
            let dir = self.collection_dir(&query.collection);
            let document_ids =
                files::list_file_stems(&dir, self.document_parser.file_extension()).await?;

            let mut documents = Vec::new();
            for document_id in document_ids {
                let Some(fields) = self.read_document(&query.collection, &document_id).await?
                else {
                    continue;
                };
                if query.matches(&fields) {
                    documents.push(DocumentSnapshot::new(document_id, fields));
                }
            }

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
            check_document_id(&document_id)?;
            Ok(self
                .read_document(&collection, &document_id)
                .await?
                .map(|fields| DocumentSnapshot::new(document_id, fields)))
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
            let id = document_id.unwrap_or_else(|| Ulid::new().to_string());
            check_document_id(&id)?;

            let _guard = self.write_lock.lock().await;
            let path = self.document_path(&collection, &id);
            if tokio::fs::try_exists(&path).await? {
                return Err(StorageError::already_exists(collection, id));
            }

            self.write_document(&collection, &id, &fields).await?;
            Ok(id)
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
            check_document_id(&document_id)?;

            let _guard = self.write_lock.lock().await;
            let mut document = self
                .read_document(&collection, &document_id)
                .await?
                .ok_or_else(|| StorageError::not_found(&collection, &document_id))?;

            document.extend(fields);
            self.write_document(&collection, &document_id, &document)
                .await
        })
    }
}
