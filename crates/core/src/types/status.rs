//! Status enums and the order lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Order status along the delivery lifecycle.
///
/// Allowed transitions form a fixed directed graph:
///
/// ```text
/// pending ──▶ confirmed ──▶ preparing ──▶ shipping ──▶ delivered
///    │            │             │             │
///    └────────────┴─────────────┴─────────────┴──────▶ cancelled
/// ```
///
/// `delivered` and `cancelled` are terminal. Every status change in the
/// system goes through [`OrderStatus::transition`]; a write that would skip
/// a step or leave a terminal state is rejected before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The statuses this one may move to.
    #[must_use]
    pub const fn allowed_next(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Preparing, Self::Cancelled],
            Self::Preparing => &[Self::Shipping, Self::Cancelled],
            Self::Shipping => &[Self::Delivered, Self::Cancelled],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Whether no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Guarded transition to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if `to` is not reachable from `self`
    /// in the lifecycle graph.
    pub fn transition(self, to: Self) -> Result<Self, InvalidTransition> {
        if self.allowed_next().contains(&to) {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "shipping" => Ok(Self::Shipping),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A rejected order-status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order cannot move from {from} to {to}")]
pub struct InvalidTransition {
    /// Status the order currently holds.
    pub from: OrderStatus,
    /// Status the caller asked for.
    pub to: OrderStatus,
}

/// Role attached to an identity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Whether an identity may sign in and act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

/// Payment-method label carried on an order.
///
/// Labels only - neither triggers an external payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentLabel {
    Cod,
    Banking,
}

impl std::fmt::Display for PaymentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "cod"),
            Self::Banking => write!(f, "banking"),
        }
    }
}

impl std::str::FromStr for PaymentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::Cod),
            "banking" => Ok(Self::Banking),
            _ => Err(format!("invalid payment label: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path_is_allowed() {
        let status = OrderStatus::Pending;
        let status = status.transition(OrderStatus::Confirmed).expect("confirm");
        let status = status.transition(OrderStatus::Preparing).expect("prepare");
        let status = status.transition(OrderStatus::Shipping).expect("ship");
        let status = status.transition(OrderStatus::Delivered).expect("deliver");
        assert!(status.is_terminal());
    }

    #[test]
    fn test_cancel_allowed_from_every_non_terminal_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Shipping,
        ] {
            assert_eq!(
                from.transition(OrderStatus::Cancelled),
                Ok(OrderStatus::Cancelled)
            );
        }
    }

    #[test]
    fn test_skipping_a_step_is_rejected() {
        let err = OrderStatus::Pending
            .transition(OrderStatus::Shipping)
            .expect_err("must reject");
        assert_eq!(err.from, OrderStatus::Pending);
        assert_eq!(err.to, OrderStatus::Shipping);
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(from.allowed_next().is_empty());
            for to in [
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::Shipping,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(from.transition(to).is_err());
            }
        }
    }

    #[test]
    fn test_backwards_move_is_rejected() {
        assert!(
            OrderStatus::Shipping
                .transition(OrderStatus::Pending)
                .is_err()
        );
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).expect("serialize");
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_payment_label_round_trip() {
        assert_eq!("cod".parse::<PaymentLabel>(), Ok(PaymentLabel::Cod));
        assert_eq!("banking".parse::<PaymentLabel>(), Ok(PaymentLabel::Banking));
        assert!("paypal".parse::<PaymentLabel>().is_err());
    }
}
