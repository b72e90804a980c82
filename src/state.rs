use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    Argon2PasswordHasher, AuthService, JwtTokenIssuer, SeaOrmAuthService, SeaOrmTaskService,
    TaskService,
};

/// Everything the HTTP layer needs: the store, the domain services, and the
/// token verifier for the authorization middleware. Services receive their
/// dependencies at construction; nothing here is ambient or static.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub task_service: Arc<dyn TaskService>,

    pub token_issuer: Arc<JwtTokenIssuer>,
}

impl AppState {
    pub async fn from_config(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = Store::new(&config.general.database_path).await?;

        let hasher = Arc::new(Argon2PasswordHasher::new(config.security.clone()));
        let token_issuer = Arc::new(JwtTokenIssuer::new(config.jwt.clone()));

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            hasher,
            token_issuer.clone(),
        ));
        let task_service = Arc::new(SeaOrmTaskService::new(store.clone()));

        Ok(Arc::new(Self {
            config,
            store,
            auth_service,
            task_service,
            token_issuer,
        }))
    }
}
