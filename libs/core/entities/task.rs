use bizdir_storage::{CollectionPath, Document};
use patronus::patronus;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use typed_builder::TypedBuilder;

use super::business::businesses_collection;

pub type TaskId = String;

pub const TASKS_COLLECTION: &str = "tasks";

/// Tasks are a sub-collection of their business
pub fn tasks_collection(business_id: &str) -> CollectionPath {
    businesses_collection().sub_collection(business_id, TASKS_COLLECTION)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
    Approved,
    Rejected,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, TypedBuilder)]
#[patronus(
    name = "TaskUpdate",
    derives = "Default, Debug, Clone, PartialEq, Serialize"
)]
pub struct TaskRecord {
    #[serde(skip)]
    #[builder(default, setter(into))]
    pub id: TaskId,
    #[builder(setter(into))]
    pub title: String,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,
    #[builder(setter(into))]
    pub assigned_to: String,
    #[builder(default = TaskStatus::Pending)]
    pub status: TaskStatus,
    /// Milliseconds since epoch
    pub created_at: u64,
    #[builder(default)]
    pub completed_at: Option<u64>,
}

impl Document for TaskRecord {
    fn get_document_id(&self) -> String {
        self.id.clone()
    }

    fn set_document_id(&mut self, v: &str) {
        self.id = v.to_string();
    }
}
