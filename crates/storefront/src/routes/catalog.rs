//! Catalog browsing: categories and available foods.
//!
//! Public routes; responses come from the store client's TTL cache.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use monngon_core::{CategoryId, FoodId};
use monngon_store::documents::{Category, Food};

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FoodsQuery {
    /// Restrict the listing to one category.
    pub category: Option<CategoryId>,
}

/// GET /categories - category list sorted by ascending priority.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.store().list_categories().await?;
    Ok(Json((*categories).clone()))
}

/// GET /foods - available foods, optionally filtered by category.
pub async fn foods(
    State(state): State<AppState>,
    Query(params): Query<FoodsQuery>,
) -> Result<Json<Vec<Food>>> {
    let foods = state
        .store()
        .list_available_foods(params.category.as_ref())
        .await?;
    Ok(Json((*foods).clone()))
}

/// GET /foods/{id} - one food, available or not.
pub async fn food(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
) -> Result<Json<Food>> {
    let food = state
        .store()
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("foods/{id}")))?;
    Ok(Json(food))
}
