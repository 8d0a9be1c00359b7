//! Order history, detail, and cancellation.
//!
//! Every surface that renders an order collapses the backend's two raw
//! status fields into one display state through
//! [`OrderDisplayStatus::project`] at render time. Cancellation sits behind
//! the same confirmation gate as cart removal and bounds the optional
//! customer reason.

use chrono::{DateTime, Utc};
use mekong_core::{DeliveryStatus, OrderDisplayStatus, OrderId, OrderStatus, PaymentMethod};
use mekong_core::{ProductId, Vnd};
use tracing::instrument;

use crate::api::CommerceBackend;
use crate::cart::Confirmation;
use crate::error::{Result, StorefrontError};

/// Maximum accepted length for a cancellation reason.
pub const MAX_CANCEL_REASON_LEN: usize = 500;

/// Default page size for the history view.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    pub unit_price: Vnd,
    pub quantity: u32,
}

/// One order as listed in the history view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: OrderId,
    /// Raw lifecycle status as reported by the backend.
    pub order_status: OrderStatus,
    /// Raw delivery status, absent until fulfilment starts.
    pub delivery_status: Option<DeliveryStatus>,
    pub shop_name: Option<String>,
    pub total: Vnd,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderLine>,
}

impl OrderSummary {
    /// Display state, recomputed from the raw fields on every call.
    #[must_use]
    pub const fn display_status(&self) -> OrderDisplayStatus {
        OrderDisplayStatus::project(self.order_status, self.delivery_status)
    }

    /// Whether the customer may still cancel this order.
    ///
    /// Only orders still displaying as pending are cancellable; anything
    /// already shipping, completed, or cancelled is not.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(self.display_status(), OrderDisplayStatus::Pending)
    }
}

/// Full detail for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub summary: OrderSummary,
    pub shipping_address: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

/// Per-tab order counts for the history view header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabCounts {
    pub all: usize,
    pub pending: usize,
    pub shipping: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Count orders per display-status tab.
#[must_use]
pub fn tab_counts(orders: &[OrderSummary]) -> TabCounts {
    let mut counts = TabCounts {
        all: orders.len(),
        ..TabCounts::default()
    };
    for order in orders {
        match order.display_status() {
            OrderDisplayStatus::Pending => counts.pending += 1,
            OrderDisplayStatus::Shipping => counts.shipping += 1,
            OrderDisplayStatus::Completed => counts.completed += 1,
            OrderDisplayStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

/// Filter orders by a free-text query over order id, shop name, and item
/// names, case-insensitively. A blank query matches everything.
#[must_use]
pub fn filter_orders<'a>(orders: &'a [OrderSummary], query: &str) -> Vec<&'a OrderSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return orders.iter().collect();
    }
    orders
        .iter()
        .filter(|o| {
            o.id.to_string().contains(&needle)
                || o.shop_name
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || o.items.iter().any(|i| i.name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Read and cancel operations over the user's orders.
#[derive(Debug)]
pub struct OrderBook<B> {
    backend: B,
}

impl<B: CommerceBackend> OrderBook<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// One page of order history, newest first.
    ///
    /// # Errors
    ///
    /// Read failures surface as a retry affordance in the caller, never a
    /// crash.
    #[instrument(skip(self))]
    pub async fn history(&self, page: u32, size: u32) -> Result<Vec<OrderSummary>> {
        self.backend.fetch_orders(page, size).await
    }

    /// Full detail for one order.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when the order does not exist
    /// or belongs to another user.
    #[instrument(skip(self))]
    pub async fn detail(&self, order: OrderId) -> Result<OrderDetail> {
        self.backend.fetch_order(order).await
    }

    /// Cancel an order after an explicit confirmation gate.
    ///
    /// Returns `Ok(false)` without any backend call when the user declines.
    /// The optional reason is trimmed and bounded; a blank reason is sent
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] for an over-long reason and
    /// passes backend rejections through otherwise.
    #[instrument(skip(self, reason))]
    pub async fn cancel(
        &self,
        order: OrderId,
        reason: Option<&str>,
        confirmation: Confirmation,
    ) -> Result<bool> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        let reason = match reason.map(str::trim) {
            None | Some("") => None,
            Some(r) if r.chars().count() > MAX_CANCEL_REASON_LEN => {
                return Err(StorefrontError::validation(
                    "cancellationReason",
                    format!("reason must be at most {MAX_CANCEL_REASON_LEN} characters"),
                ));
            }
            Some(r) => Some(r),
        };
        self.backend.cancel_order(order, reason).await?;
        Ok(true)
    }
}
