use bizdir_storage::{CollectionPath, Document};
use patronus::patronus;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use typed_builder::TypedBuilder;

use crate::error::{CoreError, CoreResult};

pub type BusinessId = String;

pub const BUSINESSES_COLLECTION: &str = "businesses";
pub const MAX_RATING: f32 = 5.0;

pub fn businesses_collection() -> CollectionPath {
    CollectionPath::new(BUSINESSES_COLLECTION)
}

/// Visibility scope of a business; only approved businesses are listed to
/// the public.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BusinessStatus {
    Approved,
    PendingApproval,
}

impl BusinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::PendingApproval => "pending_approval",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, TypedBuilder)]
#[patronus(
    name = "BusinessUpdate",
    derives = "Default, Debug, Clone, PartialEq, Serialize"
)]
pub struct BusinessRecord {
    #[serde(skip)]
    #[builder(default, setter(into))]
    pub id: BusinessId,
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub category: String,
    #[builder(default = BusinessStatus::PendingApproval)]
    pub status: BusinessStatus,
    #[builder(setter(into))]
    pub owner_id: String,
    #[serde(default)]
    #[builder(default)]
    pub employees: Vec<String>,
    #[builder(default, setter(strip_option, into))]
    pub address: Option<String>,
    #[builder(default, setter(strip_option))]
    pub contact: Option<ContactInfo>,
    #[builder(default, setter(strip_option))]
    pub rating: Option<f32>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
}

impl Document for BusinessRecord {
    fn get_document_id(&self) -> String {
        self.id.clone()
    }

    fn set_document_id(&mut self, v: &str) {
        self.id = v.to_string();
    }
}

impl BusinessRecord {
    pub fn is_employee(&self, identity: &str) -> bool {
        self.employees.iter().any(|e| e == identity)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidRecord("business name is empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(CoreError::InvalidRecord("business category is empty".into()));
        }
        validate_rating(self.rating)
    }
}

pub(crate) fn validate_rating(rating: Option<f32>) -> CoreResult<()> {
    match rating {
        Some(r) if !(0.0..=MAX_RATING).contains(&r) => Err(CoreError::InvalidRecord(format!(
            "rating {r} is outside of 0-{MAX_RATING}"
        ))),
        _ => Ok(()),
    }
}

impl BusinessUpdate {
    /// Fields an owner may change directly; status goes through moderation
    /// and employees through their own operations.
    pub fn validate_owner_update(&self) -> CoreResult<()> {
        if let Some(field) = self
            .changed_fields()
            .into_iter()
            .find(|f| matches!(*f, "id" | "status" | "owner_id" | "employees"))
        {
            return Err(CoreError::InvalidRecord(format!(
                "field '{field}' cannot be updated here"
            )));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidRecord("business name is empty".into()));
            }
        }
        validate_rating(self.rating.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdir_storage::DocumentSnapshot;
    use serde_json::json;

    fn cafe() -> BusinessRecord {
        BusinessRecord::builder()
            .id("b1")
            .name("Joe's Cafe")
            .category("Food & Drink")
            .status(BusinessStatus::Approved)
            .owner_id("u1")
            .employees(vec!["u2".to_string()])
            .contact(ContactInfo {
                phone: Some("+1 555 0100".into()),
                ..Default::default()
            })
            .build()
    }

    #[test]
    fn serialized_fields_match_store_layout() {
        let snapshot = DocumentSnapshot::from_document(&cafe()).unwrap();

        assert_eq!(snapshot.id, "b1");
        assert_eq!(
            serde_json::Value::Object(snapshot.fields),
            json!({
                "name": "Joe's Cafe",
                "category": "Food & Drink",
                "status": "approved",
                "owner_id": "u1",
                "employees": ["u2"],
                "address": null,
                "contact": { "email": null, "phone": "+1 555 0100", "website": null },
                "rating": null,
                "description": null
            })
        );
    }

    #[test]
    fn minimal_document_deserializes() {
        let snapshot = DocumentSnapshot::new(
            "b9",
            bizdir_storage::to_field_map(&json!({
                "name": "QuickFix",
                "category": "Services",
                "status": "pending_approval",
                "owner_id": "u5"
            }))
            .unwrap(),
        );

        let business: BusinessRecord = snapshot.to_document().unwrap();
        assert_eq!(business.id, "b9");
        assert_eq!(business.status, BusinessStatus::PendingApproval);
        assert!(business.employees.is_empty());
        assert!(business.contact.is_none());
    }

    #[tokio::test]
    async fn records_with_empty_options_survive_file_storage() {
        use crate::entities::{task::tasks_collection, TaskRecord};
        use bizdir_storage::{storage::file::FileStorageConfig, StorageConfig};

        let business = BusinessRecord::builder()
            .id("b1")
            .name("QuickFix")
            .category("Services")
            .owner_id("u5")
            .build();
        let task = TaskRecord::builder()
            .id("t1")
            .title("Restock shelves")
            .assigned_to("u2")
            .created_at(1_700_000_000_000)
            .build();

        for format in ["json", "yaml", "toml"] {
            let temp = tempfile::tempdir().unwrap();
            let storage = FileStorageConfig {
                storage_location: Some(temp.path().to_path_buf()),
                file_format: Some(format.to_string()),
            }
            .try_into_storage()
            .unwrap();

            storage
                .create_document(&businesses_collection(), &business)
                .await
                .unwrap();
            storage
                .create_document(&tasks_collection("b1"), &task)
                .await
                .unwrap();

            let read_business = storage
                .get_document::<BusinessRecord>(&businesses_collection(), "b1")
                .await
                .unwrap();
            assert_eq!(read_business.as_ref(), Some(&business), "{format}");

            let read_task = storage
                .get_document::<TaskRecord>(&tasks_collection("b1"), "t1")
                .await
                .unwrap();
            assert_eq!(read_task.as_ref(), Some(&task), "{format}");
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let snapshot = DocumentSnapshot::new(
            "b9",
            bizdir_storage::to_field_map(&json!({
                "name": "QuickFix",
                "category": "Services",
                "status": "archived",
                "owner_id": "u5"
            }))
            .unwrap(),
        );

        assert!(snapshot.to_document::<BusinessRecord>().is_err());
    }

    #[test]
    fn status_strings() {
        assert_eq!(BusinessStatus::PendingApproval.to_string(), "pending_approval");
        assert_eq!(
            "approved".parse::<BusinessStatus>().unwrap(),
            BusinessStatus::Approved
        );
        assert_eq!(
            serde_json::to_value(BusinessStatus::PendingApproval).unwrap(),
            json!(BusinessStatus::PendingApproval.as_str())
        );
    }

    #[test]
    fn rating_bounds() {
        let mut business = cafe();
        business.rating = Some(5.0);
        assert!(business.validate().is_ok());

        business.rating = Some(5.5);
        assert!(business.validate().is_err());

        business.rating = Some(-1.0);
        assert!(business.validate().is_err());
    }

    #[test]
    fn owner_update_rules() {
        assert!(BusinessUpdate::default()
            .set_address(Some("1 Main St".to_string()))
            .validate_owner_update()
            .is_ok());

        assert!(BusinessUpdate::default()
            .set_status(BusinessStatus::Approved)
            .validate_owner_update()
            .is_err());

        assert!(BusinessUpdate::default()
            .set_rating(Some(7.0_f32))
            .validate_owner_update()
            .is_err());

        assert!(BusinessUpdate::default()
            .set_name("  ")
            .validate_owner_update()
            .is_err());
    }
}
