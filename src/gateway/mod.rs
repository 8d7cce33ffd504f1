pub mod client;
pub mod error;

// Re-export the primary gateway items so code outside can do
// "use crate::gateway::{ApiGateway, ApiError};"
pub use client::{ApiGateway, SessionExpiredHook};
pub use error::ApiError;
