pub mod base;
pub mod file_store;
pub mod memory_store;

// Re-export the primary Store items so code outside can do
// "use crate::storage::{Store, create_store};"
pub use base::{create_store, Store, ACCESS_TOKEN_KEY, CURRENCY_KEY};
