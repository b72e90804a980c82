use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::entities::{tasks, users};
use crate::models::task::{NewTask, TaskFilter, TaskPriority, TaskStatus};

pub mod migrator;
pub mod repositories;

/// Thin facade over the database connection. Owns migrations and hands out
/// per-entity repositories; services talk to the store rather than to
/// `sea_orm` directly.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;
        info!("Database ready at {}", db_url);

        Ok(Self { conn })
    }

    #[must_use]
    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn task_repo(&self) -> repositories::task::TaskRepository {
        repositories::task::TaskRepository::new(self.conn.clone())
    }

    // -- User delegates --------------------------------------------------

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool> {
        self.user_repo().exists_by_username(username).await
    }

    pub async fn insert_user_if_unique(&self, user: users::Model) -> Result<bool> {
        self.user_repo().insert_if_unique(user).await
    }

    // -- Task delegates --------------------------------------------------

    pub async fn get_task_by_id(&self, id: Uuid) -> Result<Option<tasks::Model>> {
        self.task_repo().get_by_id(id).await
    }

    pub async fn insert_task(
        &self,
        user_id: Uuid,
        task: &NewTask,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Result<tasks::Model> {
        self.task_repo().insert(user_id, task, status, priority).await
    }

    pub async fn update_task(&self, task: tasks::Model) -> Result<tasks::Model> {
        self.task_repo().update(task).await
    }

    pub async fn delete_task(&self, task: tasks::Model) -> Result<()> {
        self.task_repo().delete(task).await
    }

    pub async fn list_tasks_by_owner(
        &self,
        user_id: Uuid,
        skip: u64,
        take: u64,
        filter: TaskFilter,
    ) -> Result<Vec<tasks::Model>> {
        self.task_repo()
            .list_by_owner(user_id, skip, take, filter)
            .await
    }

    pub async fn count_tasks_by_owner(&self, user_id: Uuid, filter: TaskFilter) -> Result<u64> {
        self.task_repo().count_by_owner(user_id, filter).await
    }
}
