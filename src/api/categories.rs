use crate::gateway::{ApiError, ApiGateway};
use crate::models::{Category, CategoryPatch, NewCategory, TransactionType};

/// `GET /categories`, optionally filtered by type.
pub async fn list(
    gateway: &ApiGateway,
    category_type: Option<TransactionType>,
) -> Result<Vec<Category>, ApiError> {
    let mut query = Vec::new();
    if let Some(category_type) = category_type {
        query.push(("category_type", category_type.as_str().to_string()));
    }
    gateway.get_json("/categories", &query).await
}

/// `POST /categories`.
pub async fn create(gateway: &ApiGateway, new: &NewCategory) -> Result<Category, ApiError> {
    gateway.post_json("/categories", new).await
}

/// `PUT /categories/{id}`.
pub async fn update(
    gateway: &ApiGateway,
    id: i64,
    patch: &CategoryPatch,
) -> Result<Category, ApiError> {
    gateway.put_json(&format!("/categories/{}", id), patch).await
}

/// `DELETE /categories/{id}`.
pub async fn delete(gateway: &ApiGateway, id: i64) -> Result<(), ApiError> {
    gateway.delete(&format!("/categories/{}", id)).await
}
