//! Password hashing capability backed by Argon2id.

use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::task;

use crate::config::SecurityConfig;

/// One-way hash + verify. The service layer only ever sees this contract;
/// the algorithm behind it is interchangeable.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

pub struct Argon2PasswordHasher {
    config: SecurityConfig,
}

impl Argon2PasswordHasher {
    #[must_use]
    pub const fn new(config: SecurityConfig) -> Self {
        Self { config }
    }

    fn argon2(config: &SecurityConfig) -> Result<Argon2<'static>> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    /// Note: runs under `spawn_blocking` because Argon2 is CPU-intensive
    /// and would block the async runtime if run directly.
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let config = self.config.clone();

        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2PasswordHasher::argon2(&config)?;

            let hash = argon2
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

            Ok(hash.to_string())
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password verification task panicked: {e}"))?
    }
}
