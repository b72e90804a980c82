//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::Store;
use crate::entities::users;
use crate::services::auth_service::AuthService;
use crate::services::envelope::OpResult;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenIssuer;

pub struct SeaOrmAuthService {
    store: Store,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, email: &str, password: &str) -> OpResult<String> {
        info!("Attempting to register a new user with username {username}");

        if username.trim().is_empty() {
            warn!("Registration failed: username is required");
            return OpResult::fail(400, "Username is required.");
        }
        if email.trim().is_empty() {
            warn!("Registration failed: email is required");
            return OpResult::fail(400, "Email is required.");
        }

        match self.store.user_exists_by_username(username).await {
            Ok(true) => {
                warn!("Registration failed for username {username}: username already exists");
                return OpResult::fail(400, "Username already exists.");
            }
            Ok(false) => {}
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        }

        let password_hash = match self.hasher.hash(password).await {
            Ok(hash) => hash,
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        };

        let now = Utc::now();
        let user = users::Model {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.store.insert_user_if_unique(user).await {
            return OpResult::fail(500, format!("An error occurred: {e}"));
        }
        info!("User {username} added to the database");

        // Re-read the row we just wrote. A silent insert skip (e.g. the
        // email was already taken) or a store without read-after-write shows
        // up here as a missing user, which is reported as a failure.
        let user = match self.store.get_user_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("Failed to retrieve user {username} after registration");
                return OpResult::fail(400, "User registration failed.");
            }
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        };

        match self.tokens.issue(&user) {
            Ok(token) => {
                info!("User {} registered successfully", user.username);
                OpResult::ok(200, "User registered successfully.", token)
            }
            Err(e) => OpResult::fail(500, format!("An error occurred: {e}")),
        }
    }

    async fn authenticate(&self, identifier: &str, password: &str) -> OpResult<String> {
        info!("Authentication attempt for identifier {identifier}");

        // `@` routes the lookup to email; a username containing `@` is
        // deliberately misrouted for compatibility with existing clients.
        let lookup = if identifier.contains('@') {
            self.store.get_user_by_email(identifier).await
        } else {
            self.store.get_user_by_username(identifier).await
        };

        let user = match lookup {
            Ok(user) => user,
            Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
        };

        let verified = match &user {
            Some(user) => match self.hasher.verify(password, &user.password_hash).await {
                Ok(ok) => ok,
                Err(e) => return OpResult::fail(500, format!("An error occurred: {e}")),
            },
            None => false,
        };

        let Some(user) = user.filter(|_| verified) else {
            // Same message for unknown identifier and wrong password
            warn!("Authentication failed for identifier {identifier}");
            return OpResult::fail(400, "Invalid username or password.");
        };

        match self.tokens.issue(&user) {
            Ok(token) => {
                info!("User {} authenticated successfully", user.username);
                OpResult::ok(200, "Authenticating...", token)
            }
            Err(e) => OpResult::fail(500, format!("An error occurred: {e}")),
        }
    }
}
