use crate::{CollectionPath, FieldMap};

/// A single write of a batch, committed all together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create a document, the store generates an id when none is given
    Create {
        collection: CollectionPath,
        document_id: Option<String>,
        fields: FieldMap,
    },
    /// Merge fields into an existing document
    Update {
        collection: CollectionPath,
        document_id: String,
        fields: FieldMap,
    },
}

impl WriteOp {
    pub fn collection(&self) -> &CollectionPath {
        match self {
            Self::Create { collection, .. } | Self::Update { collection, .. } => collection,
        }
    }
}
