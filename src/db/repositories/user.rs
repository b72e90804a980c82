use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    /// Check whether a user exists with the given username
    pub async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to count users by username")?;

        Ok(count > 0)
    }

    /// Insert a user only if neither the username nor the email is taken.
    /// Returns false without writing when a matching row already exists.
    pub async fn insert_if_unique(&self, user: users::Model) -> Result<bool> {
        let existing = Users::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(user.username.clone()))
                    .add(users::Column::Email.eq(user.email.clone())),
            )
            .one(&self.conn)
            .await
            .context("Failed to check user uniqueness")?;

        if existing.is_some() {
            return Ok(false);
        }

        let active = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };
        active.insert(&self.conn).await.context("Failed to insert user")?;

        Ok(true)
    }
}
