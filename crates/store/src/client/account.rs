//! Owned account records: addresses, payment methods, vouchers, favorites.
//!
//! "Set default" used to be a best-effort "clear all, set one" batch in the
//! original system; here it is a single transactional commit so at most one
//! default can ever be observed.

use serde_json::json;
use tracing::instrument;

use monngon_core::{AddressId, FavoriteId, FoodId, PaymentMethodId, UserId, VoucherId};

use crate::collections;
use crate::documents::{
    Address, Favorite, NewAddress, NewFavorite, NewPaymentMethod, NewVoucher, PaymentMethod,
    Voucher,
};
use crate::error::StoreError;
use crate::query::{Direction, Op, Query};

use super::{StoreClient, WriteOp, validated};

impl StoreClient {
    // =========================================================================
    // Addresses
    // =========================================================================

    /// List the identity's saved addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn addresses_for(&self, owner: &UserId) -> Result<Vec<Address>, StoreError> {
        let query = Query::new().filter("owner_id", Op::Eq, owner.as_str());
        let docs = self.query_docs::<Address>(collections::ADDRESSES, &query).await?;

        let mut addresses = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut address = doc.data;
            address.id = AddressId::new(doc.id);
            validated(collections::ADDRESSES, address.id.as_str(), &address)?;
            addresses.push(address);
        }
        Ok(addresses)
    }

    /// Fetch one address by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn get_address(&self, id: &AddressId) -> Result<Option<Address>, StoreError> {
        let Some(doc) = self
            .get_doc::<Address>(collections::ADDRESSES, id.as_str())
            .await?
        else {
            return Ok(None);
        };
        let mut address = doc.data;
        address.id = AddressId::new(doc.id);
        validated(collections::ADDRESSES, address.id.as_str(), &address)?;
        Ok(Some(address))
    }

    /// Save a new address.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, address), fields(owner = %address.owner_id))]
    pub async fn add_address(&self, address: &NewAddress) -> Result<AddressId, StoreError> {
        let id = self.create_doc(collections::ADDRESSES, address).await?;
        Ok(AddressId::new(id))
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), StoreError> {
        self.delete_doc(collections::ADDRESSES, id.as_str()).await
    }

    /// Make `chosen` the identity's only default address, in one commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit is rejected or the store is
    /// unreachable.
    #[instrument(skip(self), fields(owner = %owner, address_id = %chosen))]
    pub async fn set_default_address(
        &self,
        owner: &UserId,
        chosen: &AddressId,
    ) -> Result<(), StoreError> {
        let addresses = self.addresses_for(owner).await?;
        let writes = default_flag_writes(
            collections::ADDRESSES,
            addresses.iter().map(|a| (a.id.as_str(), a.is_default)),
            chosen.as_str(),
        );
        if writes.is_empty() {
            return Err(StoreError::NotFound(format!(
                "addresses/{chosen} for {owner}"
            )));
        }
        self.commit(writes).await?;
        Ok(())
    }

    // =========================================================================
    // Payment methods
    // =========================================================================

    /// List the identity's saved payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn payment_methods_for(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PaymentMethod>, StoreError> {
        let query = Query::new().filter("owner_id", Op::Eq, owner.as_str());
        let docs = self
            .query_docs::<PaymentMethod>(collections::PAYMENT_METHODS, &query)
            .await?;

        let mut methods = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut method = doc.data;
            method.id = PaymentMethodId::new(doc.id);
            validated(collections::PAYMENT_METHODS, method.id.as_str(), &method)?;
            methods.push(method);
        }
        Ok(methods)
    }

    /// Save a new payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, method), fields(owner = %method.owner_id))]
    pub async fn add_payment_method(
        &self,
        method: &NewPaymentMethod,
    ) -> Result<PaymentMethodId, StoreError> {
        let id = self.create_doc(collections::PAYMENT_METHODS, method).await?;
        Ok(PaymentMethodId::new(id))
    }

    /// Delete a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(method_id = %id))]
    pub async fn delete_payment_method(&self, id: &PaymentMethodId) -> Result<(), StoreError> {
        self.delete_doc(collections::PAYMENT_METHODS, id.as_str()).await
    }

    /// Make `chosen` the identity's only default payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit is rejected or the store is
    /// unreachable.
    #[instrument(skip(self), fields(owner = %owner, method_id = %chosen))]
    pub async fn set_default_payment_method(
        &self,
        owner: &UserId,
        chosen: &PaymentMethodId,
    ) -> Result<(), StoreError> {
        let methods = self.payment_methods_for(owner).await?;
        let writes = default_flag_writes(
            collections::PAYMENT_METHODS,
            methods.iter().map(|m| (m.id.as_str(), m.is_default)),
            chosen.as_str(),
        );
        if writes.is_empty() {
            return Err(StoreError::NotFound(format!(
                "payment_methods/{chosen} for {owner}"
            )));
        }
        self.commit(writes).await?;
        Ok(())
    }

    // =========================================================================
    // Vouchers
    // =========================================================================

    /// List the identity's vouchers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn vouchers_for(&self, owner: &UserId) -> Result<Vec<Voucher>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .order_by("created_at", Direction::Desc);
        let docs = self.query_docs::<Voucher>(collections::VOUCHERS, &query).await?;

        let mut vouchers = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut voucher = doc.data;
            voucher.id = VoucherId::new(doc.id);
            validated(collections::VOUCHERS, voucher.id.as_str(), &voucher)?;
            vouchers.push(voucher);
        }
        Ok(vouchers)
    }

    /// Save a voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, voucher), fields(owner = %voucher.owner_id))]
    pub async fn add_voucher(&self, voucher: &NewVoucher) -> Result<VoucherId, StoreError> {
        let id = self.create_doc(collections::VOUCHERS, voucher).await?;
        Ok(VoucherId::new(id))
    }

    /// Delete a voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(voucher_id = %id))]
    pub async fn delete_voucher(&self, id: &VoucherId) -> Result<(), StoreError> {
        self.delete_doc(collections::VOUCHERS, id.as_str()).await
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// List the identity's favorites, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn favorites_for(&self, owner: &UserId) -> Result<Vec<Favorite>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .order_by("created_at", Direction::Desc);
        let docs = self
            .query_docs::<Favorite>(collections::FAVORITES, &query)
            .await?;

        Ok(docs
            .into_iter()
            .map(|doc| {
                let mut favorite = doc.data;
                favorite.id = FavoriteId::new(doc.id);
                favorite
            })
            .collect())
    }

    /// Find the identity's favorite for a food, if any.
    ///
    /// Uniqueness of the (identity, food) pair is by convention: callers
    /// query before inserting.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    #[instrument(skip(self), fields(owner = %owner, food_id = %food))]
    pub async fn find_favorite(
        &self,
        owner: &UserId,
        food: &FoodId,
    ) -> Result<Option<Favorite>, StoreError> {
        let query = Query::new()
            .filter("owner_id", Op::Eq, owner.as_str())
            .filter("food_id", Op::Eq, food.as_str())
            .limit(1);
        let docs = self
            .query_docs::<Favorite>(collections::FAVORITES, &query)
            .await?;

        Ok(docs.into_iter().next().map(|doc| {
            let mut favorite = doc.data;
            favorite.id = FavoriteId::new(doc.id);
            favorite
        }))
    }

    /// Save a favorite pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, favorite), fields(owner = %favorite.owner_id, food_id = %favorite.food_id))]
    pub async fn add_favorite(&self, favorite: &NewFavorite) -> Result<FavoriteId, StoreError> {
        let id = self.create_doc(collections::FAVORITES, favorite).await?;
        Ok(FavoriteId::new(id))
    }

    /// Remove a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(favorite_id = %id))]
    pub async fn delete_favorite(&self, id: &FavoriteId) -> Result<(), StoreError> {
        self.delete_doc(collections::FAVORITES, id.as_str()).await
    }
}

/// Build the patch set that leaves exactly `chosen` flagged as default.
///
/// Returns an empty vector when `chosen` is not among `records` (the caller
/// treats that as not-found). Records already in the right state are
/// patched anyway; the commit is atomic either way and the write count is
/// tiny.
fn default_flag_writes<'a>(
    collection: &'static str,
    records: impl Iterator<Item = (&'a str, bool)>,
    chosen: &str,
) -> Vec<WriteOp> {
    let mut writes = Vec::new();
    let mut found = false;
    for (id, _is_default) in records {
        let is_chosen = id == chosen;
        found |= is_chosen;
        writes.push(WriteOp::Patch {
            collection,
            id: id.to_string(),
            fields: json!({ "is_default": is_chosen }),
        });
    }
    if found { writes } else { Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(writes: &[WriteOp]) -> Vec<(String, bool)> {
        writes
            .iter()
            .map(|w| match w {
                WriteOp::Patch { id, fields, .. } => (
                    id.clone(),
                    fields
                        .get("is_default")
                        .and_then(serde_json::Value::as_bool)
                        .expect("is_default flag"),
                ),
                other => panic!("unexpected write: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_exactly_one_default_after_writes() {
        let records = [("a-1", true), ("a-2", false), ("a-3", false)];
        let writes = default_flag_writes("addresses", records.into_iter(), "a-3");
        let flags = flags(&writes);
        assert_eq!(
            flags,
            vec![
                ("a-1".to_string(), false),
                ("a-2".to_string(), false),
                ("a-3".to_string(), true),
            ]
        );
        assert_eq!(flags.iter().filter(|(_, d)| *d).count(), 1);
    }

    #[test]
    fn test_unknown_chosen_id_yields_no_writes() {
        let records = [("a-1", true)];
        let writes = default_flag_writes("addresses", records.into_iter(), "missing");
        assert!(writes.is_empty());
    }
}
