//! Task domain types: status/priority enums and service-layer inputs.
//!
//! Status and priority arrive as free-form strings at the API boundary and
//! are matched case-insensitively against the canonical names. Output always
//! uses the canonical spelling.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }

    /// Case-insensitive lookup against the canonical names.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(input.trim()))
    }

    /// Comma-separated canonical names, for validation messages.
    #[must_use]
    pub fn allowed_values() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(input.trim()))
    }

    #[must_use]
    pub fn allowed_values() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

/// Input for creating a task. Status and priority stay unparsed here; the
/// service validates them strictly.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
}

/// Partial update. `None` means "leave unchanged"; blank strings are treated
/// as absent as well, so there is no way to clear a field to empty.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Optional filters for task listing. Unlike creation, unparseable status or
/// priority strings are dropped rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// Transfer shape for a task, with enums rendered as their canonical names.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entities::tasks::Model> for TaskDto {
    fn from(model: crate::entities::tasks::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            status: model.status,
            priority: model.priority,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(TaskStatus::parse("pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("PENDING"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("inprogress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("Completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("bogus"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(TaskPriority::parse("low"), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::parse("MEDIUM"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::parse("High"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse("urgent"), None);
    }

    #[test]
    fn parse_ignores_surrounding_whitespace() {
        assert_eq!(TaskStatus::parse("  pending "), Some(TaskStatus::Pending));
    }

    #[test]
    fn allowed_values_lists_canonical_names() {
        assert_eq!(TaskStatus::allowed_values(), "Pending, InProgress, Completed");
        assert_eq!(TaskPriority::allowed_values(), "Low, Medium, High");
    }
}
