use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::models::{Category, ItemDetail, ItemSummary};
use crate::errors::AppError;
use crate::models::api::ApiResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    fn parse(&self) -> Result<Category, AppError> {
        let raw = self
            .category
            .as_deref()
            .ok_or_else(|| AppError::Validation("Query parameter 'category' is required".to_string()))?;
        raw.parse().map_err(AppError::Validation)
    }
}

/// GET /api/v1/categories
pub async fn handle_list_categories() -> Json<ApiResponse<Vec<Category>>> {
    ApiResponse::ok(Category::ALL.to_vec())
}

/// GET /api/v1/items?category=
pub async fn handle_list_items(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<ApiResponse<Vec<ItemSummary>>>, AppError> {
    let category = params.parse()?;
    Ok(ApiResponse::ok(state.catalog.in_category(category)))
}

/// GET /api/v1/items/:id?category=
pub async fn handle_get_item_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<ApiResponse<ItemDetail>>, AppError> {
    let category = params.parse()?;
    let item = state
        .catalog
        .get(&id)
        .filter(|item| item.category == category)
        .ok_or_else(|| {
            AppError::NotFound(format!("Item '{id}' not found in category '{category}'"))
        })?;

    let detail = state
        .item_details
        .get_or_generate(item)
        .await
        .map_err(|e| AppError::generation("Failed to generate item detail", e))?;
    Ok(ApiResponse::ok(detail))
}
