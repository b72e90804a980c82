//! Domain service for registration and login.
//!
//! Every operation resolves into an [`OpResult`] envelope; store failures
//! never escape as errors.

use crate::services::envelope::OpResult;

/// Registration and authentication, returning a signed token on success.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user and returns a token for the created account.
    ///
    /// Fails with a validation envelope when username or email is missing
    /// or the username is already taken.
    async fn register(&self, username: &str, email: &str, password: &str) -> OpResult<String>;

    /// Verifies credentials and returns a token. The identifier is treated
    /// as an email when it contains `@`, otherwise as a username. Unknown
    /// identifier and wrong password produce the same failure message.
    async fn authenticate(&self, identifier: &str, password: &str) -> OpResult<String>;
}
