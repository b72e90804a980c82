use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Unchanged,
};
use uuid::Uuid;

use crate::entities::{prelude::*, tasks};
use crate::models::task::{NewTask, TaskFilter, TaskPriority, TaskStatus};

pub struct TaskRepository {
    conn: DatabaseConnection,
}

impl TaskRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get task by ID. Ownership is checked by the service, not here.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<tasks::Model>> {
        Tasks::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query task by ID")
    }

    /// Insert a new task with validated status/priority. Timestamps are set
    /// here so created_at and updated_at start out identical.
    pub async fn insert(
        &self,
        user_id: Uuid,
        task: &NewTask,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Result<tasks::Model> {
        let now = Utc::now();

        let active = tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            due_date: Set(task.due_date),
            status: Set(status.as_str().to_string()),
            priority: Set(priority.as_str().to_string()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        active.insert(&self.conn).await.context("Failed to insert task")
    }

    /// Persist a merged task, refreshing updated_at. Every mutable column is
    /// written explicitly since the model was merged outside the ORM.
    pub async fn update(&self, task: tasks::Model) -> Result<tasks::Model> {
        let active = tasks::ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            due_date: Set(task.due_date),
            status: Set(task.status),
            priority: Set(task.priority),
            user_id: Unchanged(task.user_id),
            created_at: Unchanged(task.created_at),
            updated_at: Set(Utc::now()),
        };

        active.update(&self.conn).await.context("Failed to update task")
    }

    pub async fn delete(&self, task: tasks::Model) -> Result<()> {
        task.delete(&self.conn)
            .await
            .context("Failed to delete task")?;
        Ok(())
    }

    /// One page of tasks for an owner, newest first.
    pub async fn list_by_owner(
        &self,
        user_id: Uuid,
        skip: u64,
        take: u64,
        filter: TaskFilter,
    ) -> Result<Vec<tasks::Model>> {
        Tasks::find()
            .filter(owner_condition(user_id, filter))
            .order_by_desc(tasks::Column::CreatedAt)
            .offset(skip)
            .limit(take)
            .all(&self.conn)
            .await
            .context("Failed to list tasks")
    }

    /// Total number of tasks matching the same predicate as `list_by_owner`,
    /// ignoring pagination.
    pub async fn count_by_owner(&self, user_id: Uuid, filter: TaskFilter) -> Result<u64> {
        Tasks::find()
            .filter(owner_condition(user_id, filter))
            .count(&self.conn)
            .await
            .context("Failed to count tasks")
    }
}

/// Shared predicate for the list and count queries. Both must compose the
/// exact same filters so totals stay consistent with the page contents.
fn owner_condition(user_id: Uuid, filter: TaskFilter) -> Condition {
    let mut condition = Condition::all().add(tasks::Column::UserId.eq(user_id));

    if let Some(status) = filter.status {
        condition = condition.add(tasks::Column::Status.eq(status.as_str()));
    }

    if let Some(priority) = filter.priority {
        condition = condition.add(tasks::Column::Priority.eq(priority.as_str()));
    }

    if let Some(due) = filter.due_date {
        // Calendar-day match: any due date within [midnight, next midnight)
        let day_start = day_floor(due);
        let day_end = day_start + Duration::days(1);
        condition = condition
            .add(tasks::Column::DueDate.gte(day_start))
            .add(tasks::Column::DueDate.lt(day_end));
    }

    condition
}

fn day_floor(value: DateTime<Utc>) -> DateTime<Utc> {
    value.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_floor_drops_time_of_day() {
        let value = Utc.with_ymd_and_hms(2025, 9, 6, 17, 42, 3).unwrap();
        let floored = day_floor(value);
        assert_eq!(floored, Utc.with_ymd_and_hms(2025, 9, 6, 0, 0, 0).unwrap());
    }
}
