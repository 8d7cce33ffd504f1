use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::category::TransactionType;

/// Overall totals for a period, as computed by the server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    #[serde(default)]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub period_end: Option<DateTime<Utc>>,
}

/// Per-category totals within a period.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    pub category_type: TransactionType,
    pub total: f64,
    pub percentage: f64,
    pub transaction_count: i64,
}

/// `GET /reports/by-category` response.
#[derive(Deserialize, Debug, Clone)]
pub struct ReportByCategory {
    pub income_categories: Vec<CategorySummary>,
    pub expense_categories: Vec<CategorySummary>,
    pub summary: ReportSummary,
}

/// One month's totals; `month` is "YYYY-MM".
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyTrend {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// `GET /reports/monthly` response.
#[derive(Deserialize, Debug, Clone)]
pub struct MonthlyReport {
    pub trends: Vec<MonthlyTrend>,
    pub summary: ReportSummary,
}
