use bizdir_storage::StorageBox;
use tracing::{info, instrument};
use typed_builder::TypedBuilder;

use crate::{
    directory::role::Role,
    entities::{
        business::businesses_collection, AuthBox, BusinessRecord, BusinessStatus,
        BusinessUpdate, ContactInfo,
    },
    error::CoreResult,
};

use super::{fetch_business, require_identity, require_role};

/// Fields a user provides when listing a new business
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct RegisterBusinessInput {
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub category: String,
    #[builder(default, setter(strip_option, into))]
    pub address: Option<String>,
    #[builder(default, setter(strip_option))]
    pub contact: Option<ContactInfo>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
}

#[derive(Clone, TypedBuilder)]
pub struct BusinessService {
    storage: StorageBox,
    auth: AuthBox,
}

impl BusinessService {
    pub async fn get(&self, business_id: &str) -> CoreResult<BusinessRecord> {
        fetch_business(&self.storage, business_id).await
    }

    /// New businesses wait for moderation before they are listed publicly
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn register(&self, input: RegisterBusinessInput) -> CoreResult<BusinessRecord> {
        let identity = require_identity(&self.auth, "register a business")?;

        let mut business = BusinessRecord {
            id: String::new(),
            name: input.name,
            category: input.category,
            status: BusinessStatus::PendingApproval,
            owner_id: identity.to_string(),
            employees: Vec::new(),
            address: input.address,
            contact: input.contact,
            rating: None,
            description: input.description,
        };
        business.validate()?;

        business.id = self
            .storage
            .create_document(&businesses_collection(), &business)
            .await?;
        info!(id = %business.id, "Business registered");

        Ok(business)
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, business_id: &str) -> CoreResult<()> {
        self.write(
            business_id,
            BusinessUpdate::default().set_status(BusinessStatus::Approved),
        )
        .await?;
        info!("Business approved");
        Ok(())
    }

    #[instrument(skip(self, update), fields(fields = ?update.changed_fields()))]
    pub async fn update(&self, business_id: &str, update: BusinessUpdate) -> CoreResult<()> {
        update.validate_owner_update()?;
        self.require_owner(business_id, "update the business").await?;

        if update.is_empty() {
            return Ok(());
        }
        self.write(business_id, update).await
    }

    #[instrument(skip(self))]
    pub async fn add_employee(&self, business_id: &str, employee: &str) -> CoreResult<()> {
        let business = self.require_owner(business_id, "manage employees").await?;
        if business.is_employee(employee) {
            return Ok(());
        }

        let mut employees = business.employees;
        employees.push(employee.to_string());
        self.write(business_id, BusinessUpdate::default().set_employees(employees))
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_employee(&self, business_id: &str, employee: &str) -> CoreResult<()> {
        let business = self.require_owner(business_id, "manage employees").await?;
        if !business.is_employee(employee) {
            return Ok(());
        }

        let employees: Vec<String> = business
            .employees
            .into_iter()
            .filter(|e| e != employee)
            .collect();
        self.write(business_id, BusinessUpdate::default().set_employees(employees))
            .await
    }

    async fn require_owner(
        &self,
        business_id: &str,
        action: &'static str,
    ) -> CoreResult<BusinessRecord> {
        let identity = require_identity(&self.auth, action)?;
        let business = fetch_business(&self.storage, business_id).await?;
        require_role(&business, &identity, &[Role::Owner], action)?;
        Ok(business)
    }

    async fn write(&self, business_id: &str, update: BusinessUpdate) -> CoreResult<()> {
        self.storage
            .update_fields(&businesses_collection(), business_id, &update)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::StaticAuth,
        error::CoreError,
        test_utilities::{business, seed},
    };
    use bizdir_storage::{storage::in_memory::InMemoryStorageConfig, StorageConfig};
    use sugars::hset;

    async fn storage() -> StorageBox {
        let storage = InMemoryStorageConfig::default().try_into_storage().unwrap();
        let mut cafe = business("b1", "Joe's Cafe", "u1", BusinessStatus::Approved);
        cafe.employees = vec!["u2".into()];
        seed(&storage, vec![cafe]).await;
        storage
    }

    fn service(storage: &StorageBox, auth: StaticAuth) -> BusinessService {
        BusinessService::builder()
            .storage(storage.clone())
            .auth(AuthBox::new(auth))
            .build()
    }

    #[tokio::test]
    async fn register_requires_identity() {
        let storage = storage().await;
        let input = RegisterBusinessInput::builder()
            .name("QuickFix")
            .category("Services")
            .build();

        let err = service(&storage, StaticAuth::anonymous())
            .register(input.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated(_)));

        let created = service(&storage, StaticAuth::signed_in("u5"))
            .register(input)
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.status, BusinessStatus::PendingApproval);
        assert_eq!(created.owner_id, "u5");

        let stored = service(&storage, StaticAuth::anonymous())
            .get(&created.id)
            .await
            .unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn register_rejects_empty_name() {
        let storage = storage().await;
        let input = RegisterBusinessInput::builder()
            .name(" ")
            .category("Services")
            .build();

        let err = service(&storage, StaticAuth::signed_in("u5"))
            .register(input)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn approve_changes_status() {
        let storage = storage().await;
        let moderator = service(&storage, StaticAuth::anonymous());
        let created = service(&storage, StaticAuth::signed_in("u5"))
            .register(
                RegisterBusinessInput::builder()
                    .name("QuickFix")
                    .category("Services")
                    .build(),
            )
            .await
            .unwrap();

        moderator.approve(&created.id).await.unwrap();
        assert_eq!(
            moderator.get(&created.id).await.unwrap().status,
            BusinessStatus::Approved
        );

        let missing = moderator.approve("nope").await.unwrap_err();
        assert!(matches!(missing, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn only_owner_updates() {
        let storage = storage().await;
        let update = BusinessUpdate::default()
            .set_address(Some("1 Main St".to_string()))
            .set_rating(Some(4.5_f32));

        let err = service(&storage, StaticAuth::signed_in("u2"))
            .update("b1", update.clone())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotPermitted {
                role: Role::Employee,
                ..
            }
        ));

        let owner = service(&storage, StaticAuth::signed_in("u1"));
        owner.update("b1", update).await.unwrap();

        let business = owner.get("b1").await.unwrap();
        assert_eq!(business.address.as_deref(), Some("1 Main St"));
        assert_eq!(business.rating, Some(4.5));
        assert_eq!(business.name, "Joe's Cafe");

        let err = owner
            .update("b1", BusinessUpdate::default().set_status(BusinessStatus::PendingApproval))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn employees_have_set_semantics() {
        let storage = storage().await;
        let owner = service(&storage, StaticAuth::signed_in("u1"));

        owner.add_employee("b1", "u3").await.unwrap();
        owner.add_employee("b1", "u3").await.unwrap();
        owner.add_employee("b1", "u2").await.unwrap();

        let employees = owner.get("b1").await.unwrap().employees;
        assert_eq!(employees.len(), 2);
        assert_eq!(
            employees.into_iter().collect::<std::collections::HashSet<_>>(),
            hset! {"u2".to_string(), "u3".to_string()}
        );

        owner.remove_employee("b1", "u2").await.unwrap();
        owner.remove_employee("b1", "u9").await.unwrap();
        assert_eq!(owner.get("b1").await.unwrap().employees, vec!["u3".to_string()]);

        let err = service(&storage, StaticAuth::signed_in("u3"))
            .add_employee("b1", "u4")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotPermitted { .. }));
    }
}
