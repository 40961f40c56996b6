use bizdir_storage::StorageBox;

use crate::{
    directory::role::{resolve_role, Role},
    entities::{business::businesses_collection, AuthBox, BusinessRecord, Identity},
    error::{CoreError, CoreResult},
};

pub mod booking;
pub mod business;
pub mod directory;
pub mod task;

pub use booking::BookingService;
pub use business::{BusinessService, RegisterBusinessInput};
pub use directory::{BusinessView, DirectoryService};
pub use task::{AssigneeOutcome, NewTask, Review, TaskCreationReport, TaskService};

pub(crate) async fn fetch_business(
    storage: &StorageBox,
    business_id: &str,
) -> CoreResult<BusinessRecord> {
    let collection = businesses_collection();
    storage
        .get_document::<BusinessRecord>(&collection, business_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            collection: collection.to_string(),
            id: business_id.to_string(),
        })
}

pub(crate) fn require_identity(auth: &AuthBox, action: &'static str) -> CoreResult<Identity> {
    auth.current_identity()
        .ok_or(CoreError::Unauthenticated(action))
}

/// Fails unless the identity holds one of the `allowed` roles on the business
pub(crate) fn require_role(
    business: &BusinessRecord,
    identity: &Identity,
    allowed: &[Role],
    action: &'static str,
) -> CoreResult<Role> {
    let role = resolve_role(business, Some(identity));
    if allowed.contains(&role) {
        Ok(role)
    } else {
        Err(CoreError::NotPermitted { role, action })
    }
}
