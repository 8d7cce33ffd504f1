pub mod callback;
pub mod store;

// Re-export the primary session items so code outside can do
// "use crate::session::{SessionStore, SessionState};"
pub use callback::{reconcile, CallbackParams, Navigation};
pub use store::{SessionPhase, SessionState, SessionStore};
