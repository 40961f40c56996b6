use bizdir_storage::{Query, StorageBox};
use tracing::{info, instrument};
use typed_builder::TypedBuilder;

use crate::{
    directory::role::{resolve_role, Role},
    entities::{booking::bookings_collection, AuthBox, BookingRequest},
    error::{CoreError, CoreResult},
    utils::unix_now_ms,
};

use super::{fetch_business, require_identity, require_role};

#[derive(Clone, TypedBuilder)]
pub struct BookingService {
    storage: StorageBox,
    auth: AuthBox,
}

impl BookingService {
    /// `requested_for` is in milliseconds since epoch
    #[instrument(skip(self, note))]
    pub async fn request(
        &self,
        business_id: &str,
        requested_for: u64,
        note: Option<String>,
    ) -> CoreResult<BookingRequest> {
        let identity = require_identity(&self.auth, "book an appointment")?;
        let business = fetch_business(&self.storage, business_id).await?;

        let role = resolve_role(&business, Some(&identity));
        if role == Role::Owner {
            return Err(CoreError::NotPermitted {
                role,
                action: "book an appointment with their own business",
            });
        }

        let mut booking = BookingRequest::builder()
            .requested_by(identity.as_str())
            .requested_for(requested_for)
            .note(note)
            .created_at(unix_now_ms())
            .build();
        booking.id = self
            .storage
            .create_document(&bookings_collection(business_id), &booking)
            .await?;
        info!(id = %booking.id, "Booking requested");

        Ok(booking)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, business_id: &str) -> CoreResult<Vec<BookingRequest>> {
        let identity = require_identity(&self.auth, "see bookings")?;
        let business = fetch_business(&self.storage, business_id).await?;
        require_role(&business, &identity, &[Role::Owner], "see bookings")?;

        Ok(self
            .storage
            .query_documents::<BookingRequest>(Query::collection(bookings_collection(business_id)))
            .await?)
    }
}
