use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a category (and its transactions) counts as money in or money out.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The wire value used in query parameters and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// A user-owned transaction category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /categories`.
#[derive(Serialize, Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// Body for `PUT /categories/{id}`; absent fields are left unchanged.
#[derive(Serialize, Debug, Clone, Default)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<TransactionType>,
}
