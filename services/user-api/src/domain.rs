// Domain layer modules
pub mod user;

// Re-exports
pub use user::User;
