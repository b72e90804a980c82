pub mod auth_service;
pub mod auth_service_impl;
pub mod envelope;
pub mod password;
pub mod task_service;
pub mod task_service_impl;
pub mod token;

pub use auth_service::AuthService;
pub use auth_service_impl::SeaOrmAuthService;
pub use envelope::OpResult;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use task_service::{TaskPage, TaskService};
pub use task_service_impl::SeaOrmTaskService;
pub use token::{Claims, JwtTokenIssuer, TokenIssuer};
