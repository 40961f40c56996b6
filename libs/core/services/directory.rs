use bizdir_storage::StorageBox;
use serde_derive::Serialize;
use tracing::{debug, error, instrument};
use typed_builder::TypedBuilder;

use crate::{
    contact::{contact_actions, ContactAction},
    directory::{
        filter::{FilterAction, FilterState},
        query::DirectoryQuery,
        role::{resolve_role, Role},
    },
    entities::{AuthBox, BusinessRecord, BusinessStatus},
    error::CoreResult,
};

use super::fetch_business;

/// What the detail screen of a business needs
#[derive(Debug, Clone, Serialize)]
pub struct BusinessView {
    pub business: BusinessRecord,
    pub role: Role,
    pub actions: Vec<ContactAction>,
}

#[derive(Clone, TypedBuilder)]
pub struct DirectoryService {
    storage: StorageBox,
    auth: AuthBox,
    #[builder(default)]
    excluded_names: Vec<String>,
}

impl DirectoryService {
    fn query(&self) -> DirectoryQuery {
        DirectoryQuery::builder()
            .storage(self.storage.clone())
            .excluded_names(self.excluded_names.clone())
            .build()
    }

    /// Fetch the directory for `scope` into `state`. A failed read is logged
    /// and leaves an empty, no longer loading, state.
    #[instrument(skip(self, state))]
    pub async fn refresh(&self, state: FilterState, scope: BusinessStatus) -> FilterState {
        let state = state.reduce(FilterAction::LoadStarted);
        let identity = self.auth.current_identity();

        match self.query().fetch(scope, identity.as_ref()).await {
            Ok(records) => {
                debug!(count = records.len(), "Directory loaded");
                state.reduce(FilterAction::Loaded(records))
            }
            Err(e) => {
                error!("Failed to load the business directory: {e}");
                state.reduce(FilterAction::LoadFailed)
            }
        }
    }

    pub async fn load(&self, scope: BusinessStatus) -> FilterState {
        self.refresh(FilterState::default(), scope).await
    }

    #[instrument(skip(self))]
    pub async fn open_business(&self, business_id: &str) -> CoreResult<BusinessView> {
        let business = fetch_business(&self.storage, business_id).await?;
        let identity = self.auth.current_identity();
        let role = resolve_role(&business, identity.as_ref());
        let actions = contact_actions(&business, role, identity.as_ref());

        Ok(BusinessView {
            business,
            role,
            actions,
        })
    }
}
