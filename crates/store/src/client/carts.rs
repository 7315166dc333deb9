//! Cart line operations.
//!
//! Cart lines are scoped to their owning identity by query filters; there
//! is no server-side authorization model, so every method takes the owner
//! explicitly and callers must not widen the scope.

use serde_json::json;
use tracing::instrument;

use monngon_core::{CartLineId, FoodId, UserId};

use crate::collections;
use crate::documents::{CartLine, NewCartLine};
use crate::error::StoreError;
use crate::query::{Direction, Op, Query};

use super::{StoreClient, validated};

impl StoreClient {
    /// List the identity's cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn cart_lines_for(&self, owner: &UserId) -> Result<Vec<CartLine>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .order_by("created_at", Direction::Asc);
        let docs = self.query_docs::<CartLine>(collections::CARTS, &query).await?;

        let mut lines = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut line = doc.data;
            line.id = CartLineId::new(doc.id);
            validated(collections::CARTS, line.id.as_str(), &line)?;
            lines.push(line);
        }
        Ok(lines)
    }

    /// Find the identity's existing line for a food, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner, food_id = %food))]
    pub async fn find_cart_line(
        &self,
        owner: &UserId,
        food: &FoodId,
    ) -> Result<Option<CartLine>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .filter("food_id", Op::Eq, food.as_str())
            .limit(1);
        let docs = self.query_docs::<CartLine>(collections::CARTS, &query).await?;

        match docs.into_iter().next() {
            Some(doc) => {
                let mut line = doc.data;
                line.id = CartLineId::new(doc.id);
                validated(collections::CARTS, line.id.as_str(), &line)?;
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    /// Fetch one cart line by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(line_id = %id))]
    pub async fn get_cart_line(&self, id: &CartLineId) -> Result<Option<CartLine>, StoreError> {
        let Some(doc) = self
            .get_doc::<CartLine>(collections::CARTS, id.as_str())
            .await?
        else {
            return Ok(None);
        };
        let mut line = doc.data;
        line.id = CartLineId::new(doc.id);
        validated(collections::CARTS, line.id.as_str(), &line)?;
        Ok(Some(line))
    }

    /// Create a cart line with its food snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, line), fields(owner = %line.owner_id, food_id = %line.food_id))]
    pub async fn add_cart_line(&self, line: &NewCartLine) -> Result<CartLineId, StoreError> {
        let id = self.create_doc(collections::CARTS, line).await?;
        Ok(CartLineId::new(id))
    }

    /// Update a line's quantity in place. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(line_id = %id, quantity))]
    pub async fn set_cart_line_quantity(
        &self,
        id: &CartLineId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::CARTS, id.as_str(), &json!({ "quantity": quantity }))
            .await
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(line_id = %id))]
    pub async fn delete_cart_line(&self, id: &CartLineId) -> Result<(), StoreError> {
        self.delete_doc(collections::CARTS, id.as_str()).await
    }
}
