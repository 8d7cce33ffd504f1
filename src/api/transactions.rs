use crate::gateway::{ApiError, ApiGateway};
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionPage, TransactionPatch};

/// `GET /transactions`: one page of results. Unset filters are omitted from
/// the query so the server applies its own defaults.
pub async fn list(
    gateway: &ApiGateway,
    filter: &TransactionFilter,
) -> Result<TransactionPage, ApiError> {
    gateway.get_json("/transactions", &filter.to_query()).await
}

/// `GET /transactions/{id}`.
pub async fn get(gateway: &ApiGateway, id: i64) -> Result<Transaction, ApiError> {
    gateway.get_json(&format!("/transactions/{}", id), &[]).await
}

/// `POST /transactions`.
pub async fn create(gateway: &ApiGateway, new: &NewTransaction) -> Result<Transaction, ApiError> {
    gateway.post_json("/transactions", new).await
}

/// `PUT /transactions/{id}`.
pub async fn update(
    gateway: &ApiGateway,
    id: i64,
    patch: &TransactionPatch,
) -> Result<Transaction, ApiError> {
    gateway.put_json(&format!("/transactions/{}", id), patch).await
}

/// `DELETE /transactions/{id}`.
pub async fn delete(gateway: &ApiGateway, id: i64) -> Result<(), ApiError> {
    gateway.delete(&format!("/transactions/{}", id)).await
}
