//! Category catalog administration.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use monngon_core::CategoryId;
use monngon_store::documents::{Category, CategoryPatch, NewCategory};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
}

/// GET /categories - every category in display order.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Category>>> {
    let categories = state.store().list_categories().await?;
    Ok(Json((*categories).clone()))
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let category = NewCategory {
        name: request.name.trim().to_string(),
        description: request.description,
        priority: request.priority,
    };
    let id = state.store().create_category(&category).await?;
    info!(category_id = %id, admin = %admin.id, "category created");

    Ok((StatusCode::CREATED, Json(json!({ "category_id": id }))))
}

/// PATCH /categories/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<CategoryId>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<StatusCode> {
    if state.store().get_category(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("categories/{id}")));
    }
    if let Some(name) = request.name.as_deref()
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let patch = CategoryPatch {
        name: request.name.map(|n| n.trim().to_string()),
        description: request.description,
        priority: request.priority,
    };
    state.store().update_category(&id, &patch).await?;
    info!(category_id = %id, admin = %admin.id, "category updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /categories/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    state.store().delete_category(&id).await?;
    info!(category_id = %id, admin = %admin.id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}
