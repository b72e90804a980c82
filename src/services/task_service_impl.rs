//! `SeaORM` implementation of the `TaskService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::Store;
use crate::entities::tasks;
use crate::models::task::{NewTask, TaskDto, TaskFilter, TaskPatch, TaskPriority, TaskStatus};
use crate::services::envelope::OpResult;
use crate::services::task_service::{TaskPage, TaskService};

pub struct SeaOrmTaskService {
    store: Store,
}

impl SeaOrmTaskService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Looks up a task and applies the ownership check. A mismatch resolves
    /// to `None` so callers cannot tell foreign tasks from missing ones.
    async fn get_task_if_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<tasks::Model>> {
        let task = self.store.get_task_by_id(id).await?;
        Ok(task.filter(|t| t.user_id == user_id))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Lenient filter composition for listing: blank or unparseable strings mean
/// "no filter", unlike creation's strict validation.
fn build_filter(
    due_date: Option<DateTime<Utc>>,
    status: Option<&str>,
    priority: Option<&str>,
) -> TaskFilter {
    TaskFilter {
        due_date,
        status: status.filter(|s| !is_blank(s)).and_then(TaskStatus::parse),
        priority: priority
            .filter(|p| !is_blank(p))
            .and_then(TaskPriority::parse),
    }
}

#[async_trait]
impl TaskService for SeaOrmTaskService {
    async fn create_task(&self, user_id: Uuid, input: NewTask) -> OpResult<bool> {
        info!("Attempting to create task for user {user_id} with title {}", input.title);

        let Some(status) = TaskStatus::parse(&input.status) else {
            return OpResult::fail(
                400,
                format!(
                    "Invalid status value. Allowed values: {}.",
                    TaskStatus::allowed_values()
                ),
            );
        };

        let Some(priority) = TaskPriority::parse(&input.priority) else {
            return OpResult::fail(
                400,
                format!(
                    "Invalid priority value. Allowed values: {}.",
                    TaskPriority::allowed_values()
                ),
            );
        };

        match self.store.insert_task(user_id, &input, status, priority).await {
            Ok(task) => {
                info!("Task {} created successfully for user {user_id}", task.id);
                OpResult::ok(201, "Task created successfully.", true)
            }
            Err(e) => {
                error!("An error occurred while creating a task for user {user_id}: {e}");
                OpResult::fail(500, format!("An error occurred: {e}"))
            }
        }
    }

    async fn list_tasks(
        &self,
        user_id: Uuid,
        page_number: u64,
        page_size: u64,
        due_date: Option<DateTime<Utc>>,
        status: Option<String>,
        priority: Option<String>,
    ) -> OpResult<TaskPage> {
        info!("Attempting to retrieve tasks for user {user_id}");

        let filter = build_filter(due_date, status.as_deref(), priority.as_deref());

        // page_number 0 behaves like page 1
        let skip = page_number.saturating_sub(1).saturating_mul(page_size);

        let page = match self
            .store
            .list_tasks_by_owner(user_id, skip, page_size, filter)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!("An error occurred while retrieving tasks for user {user_id}: {e}");
                return OpResult::fail(500, format!("An error occurred: {e}"));
            }
        };

        // Same predicate as the page query, ignoring pagination
        let total_count = match self.store.count_tasks_by_owner(user_id, filter).await {
            Ok(count) => count,
            Err(e) => {
                error!("An error occurred while counting tasks for user {user_id}: {e}");
                return OpResult::fail(500, format!("An error occurred: {e}"));
            }
        };

        if page.is_empty() {
            warn!("No tasks found for user {user_id} with the specified criteria");
            return OpResult::fail_with(
                404,
                "No tasks found.",
                TaskPage {
                    tasks: None,
                    page_number,
                    page_size,
                    total_count,
                },
            );
        }

        let count = page.len();
        let tasks = page.into_iter().map(TaskDto::from).collect();

        info!("Successfully retrieved {count} tasks for user {user_id}");
        OpResult::ok(
            200,
            "Tasks retrieved successfully.",
            TaskPage {
                tasks: Some(tasks),
                page_number,
                page_size,
                total_count,
            },
        )
    }

    async fn get_task(&self, id: Uuid, user_id: Uuid) -> OpResult<TaskDto> {
        info!("Attempting to retrieve task {id} for user {user_id}");

        match self.get_task_if_owned(id, user_id).await {
            Ok(Some(task)) => {
                info!("Successfully retrieved task {id} for user {user_id}");
                OpResult::ok(200, "Task retrieved successfully.", TaskDto::from(task))
            }
            Ok(None) => {
                warn!("Task {id} not found for user {user_id}");
                OpResult::fail(404, "Task not found.")
            }
            Err(e) => {
                error!("An error occurred while retrieving task {id} for user {user_id}: {e}");
                OpResult::fail(500, format!("An error occurred: {e}"))
            }
        }
    }

    async fn update_task(&self, id: Uuid, user_id: Uuid, patch: TaskPatch) -> OpResult<bool> {
        info!("Attempting to update task {id} for user {user_id}");

        let mut task = match self.get_task_if_owned(id, user_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                warn!("Update failed. Task {id} not found for user {user_id}");
                return OpResult::fail(404, "Task not found.");
            }
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        };

        // Blank strings count as absent; there is no way to clear a field.
        if let Some(title) = patch.title.filter(|t| !is_blank(t)) {
            task.title = title;
        }
        if let Some(description) = patch.description.filter(|d| !is_blank(d)) {
            task.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        // Status/priority merge is lenient: values that fail to parse are
        // dropped, mirroring the list filters.
        if let Some(status) = patch
            .status
            .filter(|s| !is_blank(s))
            .and_then(|s| TaskStatus::parse(&s))
        {
            task.status = status.as_str().to_string();
        }
        if let Some(priority) = patch
            .priority
            .filter(|p| !is_blank(p))
            .and_then(|p| TaskPriority::parse(&p))
        {
            task.priority = priority.as_str().to_string();
        }

        match self.store.update_task(task).await {
            Ok(_) => {
                info!("Task {id} updated successfully for user {user_id}");
                OpResult::ok(200, "Task updated successfully.", true)
            }
            Err(e) => {
                error!("An error occurred while updating task {id} for user {user_id}: {e}");
                OpResult::fail(500, format!("An error occurred: {e}"))
            }
        }
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> OpResult<bool> {
        info!("Attempting to delete task {id} for user {user_id}");

        let task = match self.get_task_if_owned(id, user_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                warn!("Delete failed. Task {id} not found for user {user_id}");
                return OpResult::fail(404, "Task not found.");
            }
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        };

        match self.store.delete_task(task).await {
            Ok(()) => {
                info!("Task {id} deleted successfully for user {user_id}");
                OpResult::ok(200, "Task deleted successfully.", true)
            }
            Err(e) => {
                error!("An error occurred while deleting task {id} for user {user_id}: {e}");
                OpResult::fail(500, format!("An error occurred: {e}"))
            }
        }
    }
}
