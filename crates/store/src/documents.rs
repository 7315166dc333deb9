//! Typed records for every collection the store holds.
//!
//! The store itself is schema-less; these types are the schema the
//! application imposes at the boundary. Each read decodes into one of these
//! records and then runs [`Validate::validate`] - a document that violates
//! an invariant (non-positive price, zero quantity, out-of-range rating)
//! surfaces as [`StoreError::Invalid`](crate::StoreError::Invalid) instead
//! of flowing on half-populated.
//!
//! Cart lines and order items carry snapshot fields (name, unit price,
//! image) copied from the food at write time. Snapshots are intentionally
//! never re-synced when the catalog changes; an uncommitted cart keeps the
//! price the customer saw when they added the line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use monngon_core::{
    AccountStatus, AddressId, CartLineId, CategoryId, FavoriteId, FoodId, OrderId, OrderStatus,
    PaymentLabel, PaymentMethodId, Price, ShipperId, UserId, UserRole, VoucherId,
};

/// A document as the store returns it: an id plus flat fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

/// Decode-time validation for a record read from the store.
pub trait Validate {
    /// Check record invariants.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when an invariant is violated.
    fn validate(&self) -> Result<(), String>;
}

// =============================================================================
// Catalog
// =============================================================================

/// A food item in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(default)]
    pub id: FoodId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category_id: CategoryId,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl Validate for Food {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.price.is_positive() {
            return Err("price must be positive".to_string());
        }
        Ok(())
    }
}

/// Fields for creating or replacing a food document.
#[derive(Debug, Clone, Serialize)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Partial update for a food document (merge semantics).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FoodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// A display category, sorted client-side by ascending priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub priority: i32,
}

impl Validate for Category {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Fields for creating a category document.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub priority: i32,
}

/// Partial update for a category document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

// =============================================================================
// Cart
// =============================================================================

/// One food+quantity entry in a cart, owned by one identity.
///
/// `name`, `unit_price`, and `image_url` are snapshots taken at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub id: CartLineId,
    pub owner_id: UserId,
    pub food_id: FoodId,
    pub name: String,
    pub unit_price: Price,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl CartLine {
    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

impl Validate for CartLine {
    fn validate(&self) -> Result<(), String> {
        if self.quantity < 1 {
            return Err("quantity must be at least 1".to_string());
        }
        if !self.unit_price.is_positive() {
            return Err("unit price snapshot must be positive".to_string());
        }
        Ok(())
    }
}

/// Fields for creating a cart line.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartLine {
    pub owner_id: UserId,
    pub food_id: FoodId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Orders
// =============================================================================

/// Item snapshot frozen into an order at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub food_id: FoodId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Recipient contact fields collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// An order document. Never deleted; mutated only by admin status
/// transitions and the owner's one-shot post-delivery review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: OrderId,
    pub owner_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub recipient: Recipient,
    #[serde(default)]
    pub note: Option<String>,
    pub payment: PaymentLabel,
    #[serde(default)]
    pub shipper_id: Option<ShipperId>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Validate for Order {
    fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("order must carry at least one item".to_string());
        }
        if self.items.iter().any(|item| item.quantity < 1) {
            return Err("order item quantity must be at least 1".to_string());
        }
        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(format!("rating must be between 1 and 5, got {rating}"));
        }
        if self.total != self.subtotal + self.delivery_fee {
            return Err("total must equal subtotal plus delivery fee".to_string());
        }
        Ok(())
    }
}

/// Fields for creating an order document.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub owner_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub recipient: Recipient,
    pub note: Option<String>,
    pub payment: PaymentLabel,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Identity & account
// =============================================================================

/// Identity profile; document id equals the auth service's user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub role: UserRole,
    pub status: AccountStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Validate for Profile {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        Ok(())
    }
}

/// Fields written at registration (merged under the auth user id).
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Profile fields the owner may edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub id: AddressId,
    pub owner_id: UserId,
    pub label: String,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub is_default: bool,
}

impl Validate for Address {
    fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("address must not be empty".to_string());
        }
        Ok(())
    }
}

/// Fields for creating an address document.
#[derive(Debug, Clone, Serialize)]
pub struct NewAddress {
    pub owner_id: UserId,
    pub label: String,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub is_default: bool,
}

/// A saved payment method label (no card processing happens here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(default)]
    pub id: PaymentMethodId,
    pub owner_id: UserId,
    pub label: PaymentLabel,
    #[serde(default)]
    pub display_name: String,
    pub is_default: bool,
}

impl Validate for PaymentMethod {
    fn validate(&self) -> Result<(), String> {
        let _ = self;
        Ok(())
    }
}

/// Fields for creating a payment method document.
#[derive(Debug, Clone, Serialize)]
pub struct NewPaymentMethod {
    pub owner_id: UserId,
    pub label: PaymentLabel,
    pub display_name: String,
    pub is_default: bool,
}

/// A voucher owned by one identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(default)]
    pub id: VoucherId,
    pub owner_id: UserId,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl Validate for Voucher {
    fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("code must not be empty".to_string());
        }
        Ok(())
    }
}

/// Fields for creating a voucher document.
#[derive(Debug, Clone, Serialize)]
pub struct NewVoucher {
    pub owner_id: UserId,
    pub code: String,
    pub description: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

/// An (identity, food) favorite pair; unique by query-before-insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(default)]
    pub id: FavoriteId,
    pub owner_id: UserId,
    pub food_id: FoodId,
    pub created_at: DateTime<Utc>,
}

impl Validate for Favorite {
    fn validate(&self) -> Result<(), String> {
        let _ = self;
        Ok(())
    }
}

/// Fields for creating a favorite document.
#[derive(Debug, Clone, Serialize)]
pub struct NewFavorite {
    pub owner_id: UserId,
    pub food_id: FoodId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use monngon_core::Price;

    fn sample_order() -> Order {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().expect("ts");
        Order {
            id: OrderId::new("o-1"),
            owner_id: UserId::new("u-1"),
            items: vec![OrderItem {
                food_id: FoodId::new("f-1"),
                name: "Pho bo".to_string(),
                unit_price: Price::vnd(45_000_i64),
                quantity: 2,
                image_url: None,
            }],
            subtotal: Price::vnd(90_000_i64),
            delivery_fee: Price::vnd(15_000_i64),
            total: Price::vnd(105_000_i64),
            status: OrderStatus::Pending,
            recipient: Recipient {
                name: "Nguyen Van A".to_string(),
                phone: "0912345678".to_string(),
                address: "1 Le Loi, Q1".to_string(),
            },
            note: None,
            payment: PaymentLabel::Cod,
            shipper_id: None,
            rating: None,
            review: None,
            created_at,
        }
    }

    #[test]
    fn test_valid_order_passes() {
        assert!(sample_order().validate().is_ok());
    }

    #[test]
    fn test_order_total_mismatch_fails_loudly() {
        let mut order = sample_order();
        order.total = Price::vnd(100_000_i64);
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_order_rating_out_of_range() {
        let mut order = sample_order();
        order.rating = Some(6);
        assert!(order.validate().is_err());
        order.rating = Some(5);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_with_no_items_rejected() {
        let mut order = sample_order();
        order.items.clear();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_food_price_must_be_positive() {
        let food = Food {
            id: FoodId::new("f-1"),
            name: "Banh mi".to_string(),
            description: String::new(),
            price: Price::vnd(0_i64),
            category_id: CategoryId::new("c-1"),
            image_url: None,
            is_available: true,
        };
        assert_eq!(
            food.validate(),
            Err("price must be positive".to_string())
        );
    }

    #[test]
    fn test_cart_line_zero_quantity_rejected() {
        let line = CartLine {
            id: CartLineId::new("l-1"),
            owner_id: UserId::new("u-1"),
            food_id: FoodId::new("f-1"),
            name: "Banh mi".to_string(),
            unit_price: Price::vnd(25_000_i64),
            image_url: None,
            quantity: 0,
            created_at: Utc::now(),
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_cart_line_total_uses_snapshot_price() {
        let line = CartLine {
            id: CartLineId::new("l-1"),
            owner_id: UserId::new("u-1"),
            food_id: FoodId::new("f-1"),
            name: "Banh mi".to_string(),
            unit_price: Price::vnd(25_000_i64),
            image_url: None,
            quantity: 3,
            created_at: Utc::now(),
        };
        assert_eq!(line.line_total(), Price::vnd(75_000_i64));
    }

    #[test]
    fn test_document_flatten_round_trip() {
        let json = serde_json::json!({
            "id": "c-9",
            "name": "Drinks",
            "description": "",
            "priority": 3
        });
        let doc: Document<Category> = serde_json::from_value(json).expect("decode");
        assert_eq!(doc.id, "c-9");
        assert_eq!(doc.data.priority, 3);
    }
}
