//! Domain service for task CRUD, filtering, and pagination.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::task::{NewTask, TaskDto, TaskPatch};
use crate::services::envelope::OpResult;

/// One page of tasks plus the pagination metadata that produced it.
/// `tasks` is absent on the empty-page result, which still reports the true
/// total count.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPage {
    pub tasks: Option<Vec<TaskDto>>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
}

/// Task operations, all scoped to the owning user. A task owned by someone
/// else is indistinguishable from a missing one.
#[async_trait::async_trait]
pub trait TaskService: Send + Sync {
    /// Creates a task. Status and priority are validated strictly; an
    /// unknown value is a validation failure listing the allowed names.
    async fn create_task(&self, user_id: Uuid, input: NewTask) -> OpResult<bool>;

    /// Offset-paginated listing with optional filters. Unparseable status or
    /// priority filters are ignored rather than rejected; a due-date filter
    /// matches on the calendar day.
    async fn list_tasks(
        &self,
        user_id: Uuid,
        page_number: u64,
        page_size: u64,
        due_date: Option<DateTime<Utc>>,
        status: Option<String>,
        priority: Option<String>,
    ) -> OpResult<TaskPage>;

    async fn get_task(&self, id: Uuid, user_id: Uuid) -> OpResult<TaskDto>;

    /// Partial merge: absent or blank string fields stay unchanged, and
    /// unparseable status/priority values are silently ignored. Succeeds
    /// even when nothing changed.
    async fn update_task(&self, id: Uuid, user_id: Uuid, patch: TaskPatch) -> OpResult<bool>;

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> OpResult<bool>;
}
