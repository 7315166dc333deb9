//! Order operations, including the transactional checkout commit.

use serde_json::json;
use tracing::instrument;

use monngon_core::{CartLineId, OrderId, OrderStatus, ShipperId, UserId};

use crate::collections;
use crate::documents::{NewOrder, Order};
use crate::error::StoreError;
use crate::query::{Direction, Op, Query};

use super::{StoreClient, WriteOp, validated};

impl StoreClient {
    /// Create the order and delete the consumed cart lines in one
    /// transactional commit. Either the order exists and the lines are
    /// gone, or nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CommitRejected`] if the store refuses the
    /// transaction (e.g. a line was deleted concurrently), or another
    /// variant on transport/decoding failures.
    #[instrument(skip(self, order, consumed), fields(owner = %order.owner_id, lines = consumed.len()))]
    pub async fn place_order(
        &self,
        order: &NewOrder,
        consumed: &[CartLineId],
    ) -> Result<OrderId, StoreError> {
        let mut writes = Vec::with_capacity(consumed.len() + 1);
        writes.push(WriteOp::Create {
            collection: collections::ORDERS,
            fields: Self::fields(order)?,
        });
        for line in consumed {
            writes.push(WriteOp::Delete {
                collection: collections::CARTS,
                id: line.as_str().to_string(),
            });
        }

        let outcome = self.commit(writes).await?;
        let id = outcome.created_ids.into_iter().next().ok_or_else(|| {
            StoreError::CommitRejected("commit returned no created order id".to_string())
        })?;
        Ok(OrderId::new(id))
    }

    /// List the identity's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn orders_for(&self, owner: &UserId) -> Result<Vec<Order>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .order_by("created_at", Direction::Desc);
        self.query_orders(&query).await
    }

    /// List all orders (admin console), newest first, optionally filtered
    /// by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, StoreError> {
        let mut query = Query::new().order_by("created_at", Direction::Desc);
        if let Some(status) = status {
            query = query.filter("status", Op::Eq, status.to_string());
        }
        self.query_orders(&query).await
    }

    async fn query_orders(&self, query: &Query) -> Result<Vec<Order>, StoreError> {
        let docs = self.query_docs::<Order>(collections::ORDERS, query).await?;

        let mut orders = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut order = doc.data;
            order.id = OrderId::new(doc.id);
            validated(collections::ORDERS, order.id.as_str(), &order)?;
            orders.push(order);
        }
        Ok(orders)
    }

    /// Fetch one order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let Some(doc) = self.get_doc::<Order>(collections::ORDERS, id.as_str()).await? else {
            return Ok(None);
        };
        let mut order = doc.data;
        order.id = OrderId::new(doc.id);
        validated(collections::ORDERS, order.id.as_str(), &order)?;
        Ok(Some(order))
    }

    /// Write an already-guarded status change.
    ///
    /// Callers must obtain `status` from [`OrderStatus::transition`]; this
    /// method is a dumb write on purpose so the guard lives in one place.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(order_id = %id, %status))]
    pub async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::ORDERS, id.as_str(), &json!({ "status": status }))
            .await
    }

    /// Assign a shipper; the same write forces the order to `shipping`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(order_id = %id, shipper = %shipper))]
    pub async fn assign_shipper(
        &self,
        id: &OrderId,
        shipper: &ShipperId,
    ) -> Result<(), StoreError> {
        self.patch_doc(
            collections::ORDERS,
            id.as_str(),
            &json!({
                "shipper_id": shipper.as_str(),
                "status": OrderStatus::Shipping,
            }),
        )
        .await
    }

    /// Attach the owner's one-shot post-delivery review.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, review), fields(order_id = %id, rating))]
    pub async fn attach_review(
        &self,
        id: &OrderId,
        rating: u8,
        review: Option<&str>,
    ) -> Result<(), StoreError> {
        self.patch_doc(
            collections::ORDERS,
            id.as_str(),
            &json!({ "rating": rating, "review": review }),
        )
        .await
    }
}
