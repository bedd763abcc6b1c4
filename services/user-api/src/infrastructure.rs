// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod user_item;
pub mod user_repository;

// Re-exports
pub use config::{ConfigError, DynamoDbConfig, UserApiSettings};
pub use logging::init_logging;
pub use user_repository::{DynamoUserRepository, UserRepository, UserRepositoryError};
