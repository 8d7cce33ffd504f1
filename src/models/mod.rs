pub mod category;
pub mod report;
pub mod token;
pub mod transaction;
pub mod user;

// Re-export the wire types so callers can do "use moneta::models::User;".
pub use category::{Category, CategoryPatch, NewCategory, TransactionType};
pub use report::{CategorySummary, MonthlyReport, MonthlyTrend, ReportByCategory, ReportSummary};
pub use token::TokenResponse;
pub use transaction::{NewTransaction, Transaction, TransactionFilter, TransactionPage, TransactionPatch};
pub use user::User;
