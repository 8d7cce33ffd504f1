use chrono::{DateTime, Utc};

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{MonthlyReport, ReportByCategory, ReportSummary};

fn period_query(
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(start_date) = start_date {
        query.push(("start_date", start_date.to_rfc3339()));
    }
    if let Some(end_date) = end_date {
        query.push(("end_date", end_date.to_rfc3339()));
    }
    query
}

/// `GET /reports/summary`: totals for the period (or all time).
pub async fn summary(
    gateway: &ApiGateway,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
) -> Result<ReportSummary, ApiError> {
    gateway
        .get_json("/reports/summary", &period_query(start_date, end_date))
        .await
}

/// `GET /reports/by-category`: per-category breakdown with percentages.
pub async fn by_category(
    gateway: &ApiGateway,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
) -> Result<ReportByCategory, ApiError> {
    gateway
        .get_json("/reports/by-category", &period_query(start_date, end_date))
        .await
}

/// `GET /reports/monthly`: month-by-month trends. The server defaults to
/// the last 12 months when `months` is unset.
pub async fn monthly(gateway: &ApiGateway, months: Option<u32>) -> Result<MonthlyReport, ApiError> {
    let mut query = Vec::new();
    if let Some(months) = months {
        query.push(("months", months.to_string()));
    }
    gateway.get_json("/reports/monthly", &query).await
}
