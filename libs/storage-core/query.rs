use derive_more::Display;
use serde_json::Value;

use crate::FieldMap;

/// Slash separated path of a collection, e.g. `businesses` or
/// `businesses/<id>/tasks` for a sub-collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn sub_collection(&self, document_id: &str, name: &str) -> Self {
        Self(format!("{}/{}/{}", self.0, document_id, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub value: Value,
}

/// Conjunction of equality predicates over a single collection
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: CollectionPath,
    pub predicates: Vec<Predicate>,
}

impl Query {
    pub fn collection(collection: CollectionPath) -> Self {
        Self {
            collection,
            predicates: Vec::new(),
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// A missing field never matches, even against `null`.
    pub fn matches(&self, fields: &FieldMap) -> bool {
        self.predicates
            .iter()
            .all(|p| fields.get(&p.field).is_some_and(|v| *v == p.value))
    }
}
