//! Order status enums and the display-status projection.
//!
//! The backend tracks two independent fields per order: the order lifecycle
//! status and the delivery status. Every order-rendering surface (history
//! list, dashboard, detail view) collapses the pair into a single display
//! state via [`OrderDisplayStatus::project`]; the display state is never
//! stored, always recomputed, so the two sources cannot drift.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// Unrecognized wire value; projects to pending.
    #[serde(other)]
    Unknown,
}

/// Delivery status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    #[default]
    Preparing,
    Shipping,
    InTransit,
    Delivered,
    /// Unrecognized wire value; has no effect on projection.
    #[serde(other)]
    Unknown,
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Bank transfer via QR code.
    Qr,
}

/// The single display state shown for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDisplayStatus {
    Pending,
    Shipping,
    Completed,
    Cancelled,
}

impl OrderDisplayStatus {
    /// Project the two raw backend fields onto one display state.
    ///
    /// The precedence is fixed and total: cancellation and completion are
    /// terminal and win regardless of delivery state; delivery-in-progress
    /// is checked next; everything else is pending. An order that is both
    /// `CONFIRMED` and `SHIPPING` therefore displays as shipping.
    #[must_use]
    pub const fn project(order: OrderStatus, delivery: Option<DeliveryStatus>) -> Self {
        match order {
            OrderStatus::Cancelled => Self::Cancelled,
            OrderStatus::Completed => Self::Completed,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Unknown => match delivery {
                Some(DeliveryStatus::Shipping | DeliveryStatus::InTransit) => Self::Shipping,
                _ => Self::Pending,
            },
        }
    }
}

impl std::fmt::Display for OrderDisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Shipping => write!(f, "shipping"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
