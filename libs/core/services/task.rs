use bizdir_storage::{DocumentSnapshot, Query, StorageBox, WriteOp};
use futures::future::join_all;
use serde_derive::Serialize;
use tracing::{debug, info, instrument, warn};
use typed_builder::TypedBuilder;

use crate::{
    directory::role::{resolve_role, Role},
    entities::{
        task::tasks_collection, AuthBox, BusinessRecord, TaskId, TaskRecord, TaskStatus,
        TaskUpdate,
    },
    error::{CoreError, CoreResult},
    utils::unix_now_ms,
};

use super::{fetch_business, require_identity, require_role};

#[derive(Clone, Debug, TypedBuilder)]
pub struct NewTask {
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssigneeOutcome {
    Created { task_id: TaskId },
    Failed { reason: String },
}

/// Result of creating one task per assignee, in assignee order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskCreationReport {
    pub outcomes: Vec<(String, AssigneeOutcome)>,
}

impl TaskCreationReport {
    pub fn created(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(assignee, outcome)| match outcome {
            AssigneeOutcome::Created { task_id } => Some((assignee.as_str(), task_id.as_str())),
            AssigneeOutcome::Failed { .. } => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(assignee, outcome)| match outcome {
            AssigneeOutcome::Failed { reason } => Some((assignee.as_str(), reason.as_str())),
            AssigneeOutcome::Created { .. } => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Review {
    Approve,
    Reject,
}

impl Review {
    fn target_status(self) -> TaskStatus {
        match self {
            Self::Approve => TaskStatus::Approved,
            Self::Reject => TaskStatus::Rejected,
        }
    }
}

#[derive(Clone, TypedBuilder)]
pub struct TaskService {
    storage: StorageBox,
    auth: AuthBox,
}

impl TaskService {
    /// Create one task per assignee. Assignees must be employees of the
    /// business, others are reported as failed and never written.
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn create_for_assignees(
        &self,
        business_id: &str,
        task: NewTask,
        assignees: &[String],
    ) -> CoreResult<TaskCreationReport> {
        let identity = require_identity(&self.auth, "assign tasks")?;
        let business = fetch_business(&self.storage, business_id).await?;
        require_role(&business, &identity, &[Role::Owner], "assign tasks")?;

        let created_at = unix_now_ms();
        let mut outcomes: Vec<(String, Option<AssigneeOutcome>)> = Vec::new();
        let mut records: Vec<TaskRecord> = Vec::new();

        for assignee in assignees {
            if outcomes.iter().any(|(a, _)| a == assignee) {
                continue;
            }
            if business.is_employee(assignee) {
                outcomes.push((assignee.clone(), None));
                records.push(
                    TaskRecord::builder()
                        .title(task.title.clone())
                        .description(task.description.clone())
                        .assigned_to(assignee.clone())
                        .created_at(created_at)
                        .build(),
                );
            } else {
                warn!(%assignee, "Assignee is not an employee of the business");
                outcomes.push((
                    assignee.clone(),
                    Some(AssigneeOutcome::Failed {
                        reason: format!("'{assignee}' is not an employee of this business"),
                    }),
                ));
            }
        }

        let mut written = self.write_tasks(&business, records).await?.into_iter();
        let outcomes = outcomes
            .into_iter()
            .map(|(assignee, outcome)| {
                let outcome = outcome.or_else(|| written.next()).unwrap_or_else(|| {
                    AssigneeOutcome::Failed {
                        reason: "no write was issued".to_string(),
                    }
                });
                (assignee, outcome)
            })
            .collect();

        let report = TaskCreationReport { outcomes };
        info!(
            created = report.created().count(),
            failed = report.failed().count(),
            "Tasks assigned"
        );
        Ok(report)
    }

    /// One outcome per record, in order
    async fn write_tasks(
        &self,
        business: &BusinessRecord,
        records: Vec<TaskRecord>,
    ) -> CoreResult<Vec<AssigneeOutcome>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let collection = tasks_collection(&business.id);

        if self.storage.supports_batch() {
            let writes = records
                .iter()
                .map(|record| {
                    Ok(WriteOp::Create {
                        collection: collection.clone(),
                        document_id: None,
                        fields: DocumentSnapshot::from_document(record)?.fields,
                    })
                })
                .collect::<CoreResult<Vec<_>>>()?;

            debug!(count = writes.len(), "Committing task batch");
            let ids = self.storage.commit_batch(writes).await?;
            return Ok(ids
                .into_iter()
                .map(|task_id| AssigneeOutcome::Created { task_id })
                .collect());
        }

        debug!(count = records.len(), "Writing tasks one by one");
        let writes = records
            .iter()
            .map(|record| self.storage.create_document(&collection, record));

        Ok(join_all(writes)
            .await
            .into_iter()
            .map(|result| match result {
                Ok(task_id) => AssigneeOutcome::Created { task_id },
                Err(e) => AssigneeOutcome::Failed {
                    reason: e.to_string(),
                },
            })
            .collect())
    }

    /// Owners see every task, employees only their own
    #[instrument(skip(self))]
    pub async fn list(&self, business_id: &str) -> CoreResult<Vec<TaskRecord>> {
        let identity = require_identity(&self.auth, "see tasks")?;
        let business = fetch_business(&self.storage, business_id).await?;
        let role = require_role(
            &business,
            &identity,
            &[Role::Owner, Role::Employee],
            "see tasks",
        )?;

        let mut query = Query::collection(tasks_collection(business_id));
        if role == Role::Employee {
            query = query.where_eq("assigned_to", identity.as_str());
        }

        Ok(self.storage.query_documents::<TaskRecord>(query).await?)
    }

    #[instrument(skip(self))]
    pub async fn complete(&self, business_id: &str, task_id: &str) -> CoreResult<()> {
        let identity = require_identity(&self.auth, "complete a task")?;
        let business = fetch_business(&self.storage, business_id).await?;
        let task = self.fetch_task(business_id, task_id).await?;

        if task.assigned_to != identity.as_str() {
            return Err(CoreError::NotPermitted {
                role: resolve_role(&business, Some(&identity)),
                action: "complete a task assigned to someone else",
            });
        }
        if task.status != TaskStatus::Pending {
            return Err(CoreError::InvalidTransition {
                action: "complete",
                status: task.status,
            });
        }

        let update = TaskUpdate::default()
            .set_status(TaskStatus::Completed)
            .set_completed_at(Some(unix_now_ms()));
        self.write(business_id, task_id, &update).await
    }

    #[instrument(skip(self))]
    pub async fn review(&self, business_id: &str, task_id: &str, review: Review) -> CoreResult<()> {
        let identity = require_identity(&self.auth, "review a task")?;
        let business = fetch_business(&self.storage, business_id).await?;
        require_role(&business, &identity, &[Role::Owner], "review a task")?;

        let task = self.fetch_task(business_id, task_id).await?;
        if task.status != TaskStatus::Completed {
            return Err(CoreError::InvalidTransition {
                action: "review",
                status: task.status,
            });
        }

        let update = TaskUpdate::default().set_status(review.target_status());
        self.write(business_id, task_id, &update).await
    }

    async fn fetch_task(&self, business_id: &str, task_id: &str) -> CoreResult<TaskRecord> {
        let collection = tasks_collection(business_id);
        self.storage
            .get_document::<TaskRecord>(&collection, task_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                collection: collection.to_string(),
                id: task_id.to_string(),
            })
    }

    async fn write(&self, business_id: &str, task_id: &str, update: &TaskUpdate) -> CoreResult<()> {
        self.storage
            .update_fields(&tasks_collection(business_id), task_id, update)
            .await?;
        Ok(())
    }
}
