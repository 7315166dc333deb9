//! Food catalog administration.
//!
//! Create and update accept `multipart/form-data` so an image can ride
//! along with the fields. The image goes to the asset host first; if that
//! upload fails the catalog document is left untouched.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;

use monngon_core::{CategoryId, FoodId, Price};
use monngon_store::documents::{Food, FoodPatch, NewFood};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Multipart fields collected from a food form.
///
/// Everything is optional at parse time; create and update differ in what
/// they require.
#[derive(Debug, Default)]
pub struct FoodForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub is_available: Option<bool>,
    pub image: Option<(String, Vec<u8>)>,
}

/// GET /foods - every food, including unavailable ones.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Food>>> {
    Ok(Json(state.store().list_all_foods().await?))
}

/// POST /foods - create a food, optionally uploading its image.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>)> {
    let form = read_food_form(multipart).await?;

    let name = require_trimmed(form.name.as_deref(), "name")?;
    let price = form
        .price
        .ok_or_else(|| AppError::Validation("price is required".to_string()))?;
    validate_price(price)?;
    let category_id = form
        .category_id
        .clone()
        .ok_or_else(|| AppError::Validation("category_id is required".to_string()))?;
    resolve_category(&state, &category_id).await?;

    // Upload before the document write so a failed upload aborts the save.
    let image_url = match form.image {
        Some((file_name, bytes)) => Some(state.assets().upload_image(&file_name, bytes).await?),
        None => None,
    };

    let food = NewFood {
        name,
        description: form.description.unwrap_or_default(),
        price: Price::vnd(price),
        category_id,
        image_url,
        is_available: form.is_available.unwrap_or(true),
    };
    let id = state.store().create_food(&food).await?;
    info!(food_id = %id, admin = %admin.id, "food created");

    Ok((StatusCode::CREATED, Json(json!({ "food_id": id }))))
}

/// PATCH /foods/{id} - update a food, optionally replacing its image.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<FoodId>,
    multipart: Multipart,
) -> Result<StatusCode> {
    if state.store().get_food(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("foods/{id}")));
    }

    let form = read_food_form(multipart).await?;

    if let Some(name) = form.name.as_deref()
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if let Some(price) = form.price {
        validate_price(price)?;
    }
    if let Some(category_id) = &form.category_id {
        resolve_category(&state, category_id).await?;
    }

    let image_url = match form.image {
        Some((file_name, bytes)) => Some(state.assets().upload_image(&file_name, bytes).await?),
        None => None,
    };

    let patch = FoodPatch {
        name: form.name.map(|n| n.trim().to_string()),
        description: form.description,
        price: form.price.map(Price::vnd),
        category_id: form.category_id,
        image_url,
        is_available: form.is_available,
    };
    state.store().update_food(&id, &patch).await?;
    info!(food_id = %id, admin = %admin.id, "food updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /foods/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<FoodId>,
) -> Result<StatusCode> {
    state.store().delete_food(&id).await?;
    info!(food_id = %id, admin = %admin.id, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Collect the known multipart fields; unknown fields are ignored.
async fn read_food_form(mut multipart: Multipart) -> Result<FoodForm> {
    let mut form = FoodForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price" => {
                let raw = read_text(field).await?;
                let price = raw.trim().parse::<Decimal>().map_err(|_| {
                    AppError::Validation(format!("price must be a number, got '{raw}'"))
                })?;
                form.price = Some(price);
            }
            "category_id" => form.category_id = Some(CategoryId::new(read_text(field).await?)),
            "is_available" => {
                let raw = read_text(field).await?;
                let flag = raw.trim().parse::<bool>().map_err(|_| {
                    AppError::Validation(format!("is_available must be true or false, got '{raw}'"))
                })?;
                form.is_available = Some(flag);
            }
            "image" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("image")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read image: {e}")))?;
                form.image = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))
}

fn require_trimmed(value: Option<&str>, what: &str) -> Result<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{what} is required")));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::Validation("price must be positive".to_string()));
    }
    Ok(())
}

async fn resolve_category(state: &AppState, id: &CategoryId) -> Result<()> {
    state
        .store()
        .get_category(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("category {id} does not exist")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_must_be_positive() {
        assert!(validate_price(Decimal::from(45_000_i64)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::from(-1_i64)).is_err());
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        assert_eq!(require_trimmed(Some("  Pho bo "), "name").expect("name"), "Pho bo");
        assert!(require_trimmed(Some("   "), "name").is_err());
        assert!(require_trimmed(None, "name").is_err());
    }
}
