use std::collections::HashMap;

use bizdir_storage::{Query, StorageBox, StorageResult};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

use crate::entities::{
    business::businesses_collection, BusinessRecord, BusinessStatus, Identity,
};

/// Merge two result sets by document id. Records named in `excluded_names`
/// are dropped. A record keeps the position of its first occurrence and the
/// value of its last one, so `owned` copies win over `global` ones.
pub fn merge_by_id(
    global: Vec<BusinessRecord>,
    owned: Vec<BusinessRecord>,
    excluded_names: &[String],
) -> Vec<BusinessRecord> {
    let mut merged: Vec<BusinessRecord> = Vec::with_capacity(global.len() + owned.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in global.into_iter().chain(owned) {
        if excluded_names.contains(&record.name) {
            continue;
        }

        match positions.get(&record.id) {
            Some(&index) => merged[index] = record,
            None => {
                positions.insert(record.id.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

/// Reads the businesses visible in a scope: every business with that status,
/// plus the ones owned by the caller.
#[derive(Clone, TypedBuilder)]
pub struct DirectoryQuery {
    storage: StorageBox,
    #[builder(default)]
    excluded_names: Vec<String>,
}

impl DirectoryQuery {
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        scope: BusinessStatus,
        identity: Option<&Identity>,
    ) -> StorageResult<Vec<BusinessRecord>> {
        let by_status = Query::collection(businesses_collection()).where_eq("status", scope.as_str());

        let global = self.storage.query_documents::<BusinessRecord>(by_status.clone());
        let owned = async {
            match identity {
                Some(identity) => {
                    self.storage
                        .query_documents::<BusinessRecord>(
                            by_status.clone().where_eq("owner_id", identity.as_str()),
                        )
                        .await
                }
                None => Ok(Vec::new()),
            }
        };

        let (global, owned) = tokio::try_join!(global, owned)?;
        debug!(global = global.len(), owned = owned.len(), "Directory reads done");

        Ok(merge_by_id(global, owned, &self.excluded_names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{business, seed, FlakyStorage};
    use bizdir_storage::storage::in_memory::InMemoryStorageConfig;
    use bizdir_storage::StorageConfig;

    fn ids(records: &[BusinessRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn owner_copy_wins_tie() {
        let global = vec![business("1", "Joe's Cafe", "u1", BusinessStatus::Approved)];
        let owned = vec![business("1", "updated", "u1", BusinessStatus::Approved)];

        let merged = merge_by_id(global, owned, &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "1");
        assert_eq!(merged[0].name, "updated");
    }

    #[test]
    fn first_position_is_kept() {
        let global = vec![
            business("1", "A", "u1", BusinessStatus::Approved),
            business("2", "B", "u2", BusinessStatus::Approved),
            business("3", "C", "u1", BusinessStatus::Approved),
        ];
        let owned = vec![
            business("3", "C2", "u1", BusinessStatus::Approved),
            business("4", "D", "u1", BusinessStatus::Approved),
            business("1", "A2", "u1", BusinessStatus::Approved),
        ];

        let merged = merge_by_id(global, owned, &[]);
        assert_eq!(ids(&merged), vec!["1", "2", "3", "4"]);
        assert_eq!(merged[0].name, "A2");
        assert_eq!(merged[2].name, "C2");
    }

    #[test]
    fn merge_is_idempotent_and_bounded() {
        let global = vec![
            business("1", "A", "u1", BusinessStatus::Approved),
            business("2", "B", "u2", BusinessStatus::Approved),
            business("2", "B-dup", "u2", BusinessStatus::Approved),
        ];
        let owned = vec![
            business("2", "B2", "u1", BusinessStatus::Approved),
            business("5", "E", "u1", BusinessStatus::Approved),
        ];
        let bound = global.len() + owned.len();

        let once = merge_by_id(global.clone(), owned.clone(), &[]);
        assert!(once.len() <= bound);

        let mut seen = std::collections::HashSet::new();
        assert!(once.iter().all(|r| seen.insert(r.id.clone())));

        assert_eq!(merge_by_id(once.clone(), Vec::new(), &[]), once);
        assert_eq!(merge_by_id(once.clone(), once.clone(), &[]), once);
        assert_eq!(merge_by_id(global, owned, &[]), once);
    }

    #[test]
    fn excluded_names_are_dropped_from_both_sides() {
        let excluded = vec!["Seed Business".to_string()];
        let global = vec![
            business("1", "Seed Business", "u9", BusinessStatus::Approved),
            business("2", "QuickFix", "u2", BusinessStatus::Approved),
        ];
        let owned = vec![business("3", "Seed Business", "u1", BusinessStatus::Approved)];

        let merged = merge_by_id(global, owned, &excluded);
        assert_eq!(ids(&merged), vec!["2"]);
    }

    #[tokio::test]
    async fn fetch_scopes_by_status_and_owner() {
        let storage = InMemoryStorageConfig::default().try_into_storage().unwrap();
        seed(
            &storage,
            vec![
                business("a", "Joe's Cafe", "u1", BusinessStatus::Approved),
                business("b", "QuickFix", "u2", BusinessStatus::Approved),
                business("c", "New Place", "u1", BusinessStatus::PendingApproval),
                business("d", "Other Pending", "u2", BusinessStatus::PendingApproval),
            ],
        )
        .await;

        let query = DirectoryQuery::builder().storage(storage).build();

        let approved = query.fetch(BusinessStatus::Approved, None).await.unwrap();
        assert_eq!(ids(&approved), vec!["a", "b"]);

        let pending = query
            .fetch(BusinessStatus::PendingApproval, Some(&Identity::new("u1")))
            .await
            .unwrap();
        assert_eq!(ids(&pending), vec!["c", "d"]);
    }

    #[tokio::test]
    async fn fetch_propagates_read_failures() {
        let storage = FlakyStorage::builder().fail_queries(true).build().boxed();
        let query = DirectoryQuery::builder().storage(storage).build();

        assert!(query
            .fetch(BusinessStatus::Approved, Some(&Identity::new("u1")))
            .await
            .is_err());
    }
}
