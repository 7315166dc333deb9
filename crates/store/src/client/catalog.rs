//! Catalog (foods and categories) operations.

use std::sync::Arc;

use tracing::{debug, instrument};

use monngon_core::{CategoryId, FoodId};

use crate::collections;
use crate::documents::{Category, Food, FoodPatch, NewCategory, NewFood, CategoryPatch};
use crate::error::StoreError;
use crate::query::{Direction, Op, Query};

use super::{CacheValue, StoreClient, validated};

impl StoreClient {
    /// List every category, sorted ascending by priority.
    ///
    /// Cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Arc<Vec<Category>>, StoreError> {
        let cache_key = "categories:all".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let docs = self
            .query_docs::<Category>(collections::CATEGORIES, &Query::new())
            .await?;

        let mut categories = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut category = doc.data;
            category.id = CategoryId::new(doc.id);
            validated(collections::CATEGORIES, category.id.as_str(), &category)?;
            categories.push(category);
        }
        // Display order is computed client-side, not by the store.
        categories.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));

        let categories = Arc::new(categories);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(Arc::clone(&categories)))
            .await;
        Ok(categories)
    }

    /// List available foods, optionally restricted to one category.
    ///
    /// Cached for 5 minutes per filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn list_available_foods(
        &self,
        category: Option<&CategoryId>,
    ) -> Result<Arc<Vec<Food>>, StoreError> {
        let mut query = Query::new().filter("is_available", Op::Eq, true);
        if let Some(category) = category {
            query = query.filter("category_id", Op::Eq, category.as_str());
        }
        let cache_key = query.cache_key(collections::FOODS);

        if let Some(CacheValue::Foods(foods)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for foods");
            return Ok(foods);
        }

        let docs = self.query_docs::<Food>(collections::FOODS, &query).await?;

        let mut foods = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut food = doc.data;
            food.id = FoodId::new(doc.id);
            validated(collections::FOODS, food.id.as_str(), &food)?;
            foods.push(food);
        }

        let foods = Arc::new(foods);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Foods(Arc::clone(&foods)))
            .await;
        Ok(foods)
    }

    /// List every food, including unavailable ones (admin view). Uncached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn list_all_foods(&self) -> Result<Vec<Food>, StoreError> {
        let query = Query::new().order_by("name", Direction::Asc);
        let docs = self.query_docs::<Food>(collections::FOODS, &query).await?;

        let mut foods = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut food = doc.data;
            food.id = FoodId::new(doc.id);
            validated(collections::FOODS, food.id.as_str(), &food)?;
            foods.push(food);
        }
        Ok(foods)
    }

    /// Get a food by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(food_id = %id))]
    pub async fn get_food(&self, id: &FoodId) -> Result<Option<Food>, StoreError> {
        let Some(doc) = self.get_doc::<Food>(collections::FOODS, id.as_str()).await? else {
            return Ok(None);
        };
        let mut food = doc.data;
        food.id = FoodId::new(doc.id);
        validated(collections::FOODS, food.id.as_str(), &food)?;
        Ok(Some(food))
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, StoreError> {
        let Some(doc) = self
            .get_doc::<Category>(collections::CATEGORIES, id.as_str())
            .await?
        else {
            return Ok(None);
        };
        let mut category = doc.data;
        category.id = CategoryId::new(doc.id);
        validated(collections::CATEGORIES, category.id.as_str(), &category)?;
        Ok(Some(category))
    }

    /// Create a food document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, food), fields(name = %food.name))]
    pub async fn create_food(&self, food: &NewFood) -> Result<FoodId, StoreError> {
        let id = self.create_doc(collections::FOODS, food).await?;
        self.invalidate_catalog();
        Ok(FoodId::new(id))
    }

    /// Patch a food document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, patch), fields(food_id = %id))]
    pub async fn update_food(&self, id: &FoodId, patch: &FoodPatch) -> Result<(), StoreError> {
        self.patch_doc(collections::FOODS, id.as_str(), patch).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Delete a food document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(food_id = %id))]
    pub async fn delete_food(&self, id: &FoodId) -> Result<(), StoreError> {
        self.delete_doc(collections::FOODS, id.as_str()).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Create a category document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(&self, category: &NewCategory) -> Result<CategoryId, StoreError> {
        let id = self.create_doc(collections::CATEGORIES, category).await?;
        self.invalidate_catalog();
        Ok(CategoryId::new(id))
    }

    /// Patch a category document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, patch), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        patch: &CategoryPatch,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::CATEGORIES, id.as_str(), patch)
            .await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Delete a category document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), StoreError> {
        self.delete_doc(collections::CATEGORIES, id.as_str()).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Drop cached catalog reads after an admin write.
    ///
    /// Other processes converge via the cache TTL.
    fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
    }
}
