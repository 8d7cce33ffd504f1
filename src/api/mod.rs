//! Typed wrappers over the backend's REST endpoints. All of these are
//! bearer-authenticated calls through the gateway, so the global expiry
//! policy applies to every one of them.

pub mod categories;
pub mod reports;
pub mod transactions;
