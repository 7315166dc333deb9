//! Newtype ids for type-safe document references.
//!
//! The document store addresses every record by an opaque string id. The
//! `define_id!` macro wraps those strings so a `FoodId` can never be passed
//! where an `OrderId` is expected.

/// Macro to define a type-safe id wrapper around an opaque store id.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use monngon_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("u-1");
/// let order_id = OrderId::new("o-1");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a store-assigned identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity ids
define_id!(UserId);
define_id!(FoodId);
define_id!(CategoryId);
define_id!(CartLineId);
define_id!(OrderId);
define_id!(AddressId);
define_id!(PaymentMethodId);
define_id!(VoucherId);
define_id!(FavoriteId);
define_id!(ShipperId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = FoodId::new("food-42");
        assert_eq!(id.as_str(), "food-42");
        assert_eq!(id.to_string(), "food-42");
        assert_eq!(String::from(id), "food-42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = OrderId::new("o-7");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"o-7\"");

        let back: OrderId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
