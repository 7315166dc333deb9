//! Core type definitions.

mod email;
mod id;
mod phone;
mod price;
mod status;

pub use email::{Email, EmailError};
pub use id::{
    AddressId, CartLineId, CategoryId, FavoriteId, FoodId, OrderId, PaymentMethodId, ShipperId,
    UserId, VoucherId,
};
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
pub use status::{
    AccountStatus, InvalidTransition, OrderStatus, PaymentLabel, UserRole,
};
