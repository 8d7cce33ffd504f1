use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{Category, TransactionType};

/// A single income/expense record, with the owning category embedded when
/// the server can resolve it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Body for `POST /transactions`.
#[derive(Serialize, Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub category_id: i64,
}

/// Body for `PUT /transactions/{id}`; absent fields are left unchanged.
#[derive(Serialize, Debug, Clone, Default)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// One page of `GET /transactions` results.
#[derive(Deserialize, Debug, Clone)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub pages: i64,
}

/// Query filters for `GET /transactions`. Unset fields are omitted from the
/// request entirely (the server applies its own defaults: page 1, 20 rows).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    /// Render the set filters as query pairs.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("category_id", category_id.to_string()));
        }
        if let Some(start_date) = self.start_date {
            pairs.push(("start_date", start_date.to_rfc3339()));
        }
        if let Some(end_date) = self.end_date {
            pairs.push(("end_date", end_date.to_rfc3339()));
        }
        if let Some(transaction_type) = self.transaction_type {
            pairs.push(("type", transaction_type.as_str().to_string()));
        }
        pairs
    }
}
