use bizdir_storage::{CollectionPath, Document};
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::business::businesses_collection;

pub const BOOKINGS_COLLECTION: &str = "bookings";

pub fn bookings_collection(business_id: &str) -> CollectionPath {
    businesses_collection().sub_collection(business_id, BOOKINGS_COLLECTION)
}

/// A visitor asking a business for an appointment
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, TypedBuilder)]
pub struct BookingRequest {
    #[serde(skip)]
    #[builder(default, setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub requested_by: String,
    /// Milliseconds since epoch
    pub requested_for: u64,
    #[builder(default)]
    pub note: Option<String>,
    pub created_at: u64,
}

impl Document for BookingRequest {
    fn get_document_id(&self) -> String {
        self.id.clone()
    }

    fn set_document_id(&mut self, v: &str) {
        self.id = v.to_string();
    }
}
