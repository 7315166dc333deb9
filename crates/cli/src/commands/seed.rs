//! Seed the catalog from a YAML file.
//!
//! The file declares categories with their foods nested underneath. Prices
//! are whole VND amounts.
//!
//! ```yaml
//! categories:
//!   - name: Pho
//!     description: Noodle soups
//!     priority: 1
//!     foods:
//!       - name: Pho bo
//!         description: Beef pho
//!         price: 45000
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_API_URL` - Document store base URL
//! - `STORE_PROJECT` - Document store project identifier
//! - `STORE_API_KEY` - Document store API key

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use monngon_core::{CategoryId, Price};
use monngon_store::StoreError;
use monngon_store::documents::{NewCategory, NewFood};

use super::MissingEnvVar;

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Env(#[from] MissingEnvVar),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Validation(usize),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Top-level seed file layout.
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    pub categories: Vec<SeedCategory>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub foods: Vec<SeedFood>,
}

#[derive(Debug, Deserialize)]
pub struct SeedFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Whole VND amount.
    pub price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

const fn default_available() -> bool {
    true
}

/// Seed categories and foods from a YAML file.
///
/// Existing records are matched by name: with `skip_existing` a matching
/// category is reused as the parent for its foods and a matching food is
/// left untouched; without it every declared record is created.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, validation fails, or a store write fails.
pub async fn catalog(file_path: &str, skip_existing: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let path = Path::new(file_path);
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: file_path.to_owned(),
            source,
        })?;
    let config: SeedConfig = serde_yaml::from_str(&content)?;

    info!(
        path = %file_path,
        categories = config.categories.len(),
        "Parsed seed file"
    );

    let errors = validate(&config);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Validation(errors.len()));
    }

    let store = super::store_client_from_env()?;

    let existing_categories: HashMap<String, CategoryId> = store
        .list_categories()
        .await?
        .iter()
        .map(|c| (c.name.clone(), c.id.clone()))
        .collect();
    let existing_foods: HashSet<String> = store
        .list_all_foods()
        .await?
        .into_iter()
        .map(|f| f.name)
        .collect();

    let mut categories_created = 0_usize;
    let mut foods_created = 0_usize;
    let mut skipped = 0_usize;

    for category in &config.categories {
        let category_id = match existing_categories.get(&category.name) {
            Some(id) if skip_existing => {
                info!(name = %category.name, "Category exists, reusing");
                id.clone()
            }
            _ => {
                let id = store
                    .create_category(&NewCategory {
                        name: category.name.clone(),
                        description: category.description.clone(),
                        priority: category.priority,
                    })
                    .await?;
                categories_created += 1;
                id
            }
        };

        for food in &category.foods {
            if skip_existing && existing_foods.contains(&food.name) {
                info!(name = %food.name, "Food exists, skipping");
                skipped += 1;
                continue;
            }

            store
                .create_food(&NewFood {
                    name: food.name.clone(),
                    description: food.description.clone(),
                    price: Price::vnd(food.price),
                    category_id: category_id.clone(),
                    image_url: food.image_url.clone(),
                    is_available: food.is_available,
                })
                .await?;
            foods_created += 1;
        }
    }

    info!("Seeding complete!");
    info!("  Categories created: {categories_created}");
    info!("  Foods created: {foods_created}");
    if skipped > 0 {
        warn!("  Foods skipped (already exist): {skipped}");
    }

    Ok(())
}

/// Check a seed file for problems before touching the store.
fn validate(config: &SeedConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_categories = HashSet::new();
    let mut seen_foods = HashSet::new();

    if config.categories.is_empty() {
        errors.push("seed file declares no categories".to_owned());
    }

    for category in &config.categories {
        let name = category.name.trim();
        if name.is_empty() {
            errors.push("category with empty name".to_owned());
        } else if !seen_categories.insert(name) {
            errors.push(format!("duplicate category '{name}'"));
        }

        for food in &category.foods {
            let food_name = food.name.trim();
            if food_name.is_empty() {
                errors.push(format!("food with empty name in '{name}'"));
            } else if !seen_foods.insert(food_name) {
                errors.push(format!("duplicate food '{food_name}'"));
            }
            if food.price <= 0 {
                errors.push(format!("food '{food_name}' has non-positive price"));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> SeedConfig {
        serde_yaml::from_str(yaml).expect("valid yaml")
    }

    #[test]
    fn test_valid_seed_file_passes() {
        let config = parse(
            r"
categories:
  - name: Pho
    description: Noodle soups
    priority: 1
    foods:
      - name: Pho bo
        price: 45000
      - name: Pho ga
        price: 40000
        is_available: false
",
        );
        assert!(validate(&config).is_empty());
        assert!(config.categories[0].foods[0].is_available);
        assert!(!config.categories[0].foods[1].is_available);
    }

    #[test]
    fn test_rejects_bad_prices_and_duplicates() {
        let config = parse(
            r"
categories:
  - name: Pho
    foods:
      - name: Pho bo
        price: 0
      - name: Pho bo
        price: 45000
",
        );
        let errors = validate(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("non-positive price")));
        assert!(errors.iter().any(|e| e.contains("duplicate food")));
    }

    #[test]
    fn test_rejects_empty_file() {
        let config = parse("categories: []");
        assert_eq!(validate(&config).len(), 1);
    }
}
