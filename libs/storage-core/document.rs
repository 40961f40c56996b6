use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{FieldMap, StorageError, StorageResult};

/// A typed record stored as a field map; the id lives outside the fields and
/// is injected back after deserialization.
pub trait Document: Serialize + DeserializeOwned {
    fn get_document_id(&self) -> String;
    fn set_document_id(&mut self, v: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub id: String,
    pub fields: FieldMap,
}

impl DocumentSnapshot {
    pub fn new(id: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn from_document<T: Document>(document: &T) -> StorageResult<Self> {
        Ok(Self {
            id: document.get_document_id(),
            fields: to_field_map(document)?,
        })
    }

    pub fn to_document<T: Document>(&self) -> StorageResult<T> {
        let mut document: T = serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| StorageError::corrupted_document(format!("{}: {e}", self.id)))?;
        document.set_document_id(&self.id);
        Ok(document)
    }
}

/// Serialize a value into the field map written to the store, only objects
/// are accepted.
pub fn to_field_map<T: Serialize + ?Sized>(value: &T) -> StorageResult<FieldMap> {
    match serde_json::to_value(value).map_err(StorageError::serialization)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::Serialization(format!(
            "expected an object, got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_derive::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Debug, Serialize, Deserialize)]
    struct TestDocument {
        #[serde(skip)]
        pub id: String,
        pub name: String,
    }

    impl Document for TestDocument {
        fn get_document_id(&self) -> String {
            self.id.clone()
        }

        fn set_document_id(&mut self, v: &str) {
            self.id = v.to_string();
        }
    }

    #[test]
    fn snapshot_keeps_id_outside_fields() {
        let doc = TestDocument {
            id: "my-id".to_string(),
            name: "Hello".to_string(),
        };
        let snapshot = DocumentSnapshot::from_document(&doc).unwrap();

        assert_eq!(snapshot.id, "my-id");
        assert_eq!(Value::Object(snapshot.fields.clone()), json!({ "name": "Hello" }));
        assert_eq!(snapshot.to_document::<TestDocument>().unwrap(), doc);
    }

    #[test]
    fn corrupted_fields_are_reported_with_id() {
        let snapshot = DocumentSnapshot::new(
            "broken",
            to_field_map(&json!({ "name": 42 })).unwrap(),
        );

        let err = snapshot.to_document::<TestDocument>().unwrap_err();
        assert!(matches!(err, StorageError::CorruptedDocument(ref m) if m.starts_with("broken")));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(to_field_map(&json!([1, 2, 3])).is_err());
        assert!(to_field_map("text").is_err());
    }
}
