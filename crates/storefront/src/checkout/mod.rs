//! Checkout composition: frozen handoff, form validation, submission.
//!
//! The cart hands its selected subset across the navigation boundary as an
//! explicit immutable payload, never shared mutable state. Pricing shown at
//! checkout prefers the values frozen at the moment the user clicked
//! "checkout" over a recomputation from the handed-off subset; the frozen
//! snapshot is the contract the user agreed to, and live cart state may
//! have moved on under a concurrent tab.

use mekong_core::{OrderId, PaymentMethod, PhoneNumber, Vnd};
use serde::Serialize;

use crate::api::CommerceBackend;
use crate::cart::{
    NoVouchers, PricingSnapshot, SelectionSet, SellerRef, ShopGroup, compute_totals,
    totals::shipping_for_group,
};
use crate::error::{Result, StorefrontError};

/// Maximum accepted length for the shipping address.
pub const MAX_ADDRESS_LEN: usize = 500;
/// Maximum accepted length for the optional order notes.
pub const MAX_NOTES_LEN: usize = 500;

/// Immutable payload carried from the cart view to the checkout view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHandoff {
    /// Deep copy of the selected shop groups, in cart display order.
    pub shops: Vec<ShopGroup>,
    /// Totals frozen when the user left the cart; absent when checkout was
    /// reached through an older link that predates the snapshot.
    pub pricing: Option<PricingSnapshot>,
}

/// Result of entering the checkout view.
#[derive(Debug)]
pub enum CheckoutEntry {
    /// Handoff was valid; the form can render.
    Compose(CheckoutComposer),
    /// No cart subset arrived (direct navigation); return to the cart.
    RedirectToCart,
}

/// Where to send the user after a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCheckoutView {
    /// QR payment: order detail with the payment code displayed.
    ShowQr(OrderId),
    /// Cash on delivery: plain confirmation.
    Confirmation(OrderId),
}

/// Confirmed order returned by a successful checkout call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub order_number: Option<String>,
    pub payment_method: PaymentMethod,
}

impl OrderConfirmation {
    /// The view to transition to, determined by the payment method.
    #[must_use]
    pub const fn next_view(&self) -> PostCheckoutView {
        match self.payment_method {
            PaymentMethod::Qr => PostCheckoutView::ShowQr(self.order_id),
            PaymentMethod::Cod => PostCheckoutView::Confirmation(self.order_id),
        }
    }
}

/// The order-creation request sent to the backend.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: String,
    pub phone_number: PhoneNumber,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One checkout attempt over a validated handoff.
#[derive(Debug)]
pub struct CheckoutComposer {
    shops: Vec<ShopGroup>,
    pricing: PricingSnapshot,
}

impl CheckoutComposer {
    /// Enter checkout with the navigation payload.
    ///
    /// An absent or empty handoff yields [`CheckoutEntry::RedirectToCart`];
    /// the checkout form never renders without items. This guard also
    /// covers authentication: a [`CheckoutHandoff`] only ever originates
    /// from an authenticated [`crate::cart::CartSession`], so an anonymous
    /// user reaching checkout directly carries no handoff and bounces to
    /// the cart, whose own gate redirects to login. When the handoff
    /// carries no frozen pricing, totals are recomputed from the subset
    /// with every handed-off item treated as selected.
    #[must_use]
    pub fn enter(handoff: Option<CheckoutHandoff>) -> CheckoutEntry {
        let Some(handoff) = handoff else {
            return CheckoutEntry::RedirectToCart;
        };
        if handoff.shops.iter().all(|g| g.items.is_empty()) {
            return CheckoutEntry::RedirectToCart;
        }

        let pricing = handoff
            .pricing
            .unwrap_or_else(|| recompute_pricing(&handoff.shops));
        CheckoutEntry::Compose(Self {
            shops: handoff.shops,
            pricing,
        })
    }

    /// The shop groups being ordered, in cart display order.
    #[must_use]
    pub fn shops(&self) -> &[ShopGroup] {
        &self.shops
    }

    /// Totals for display and submission.
    #[must_use]
    pub const fn pricing(&self) -> PricingSnapshot {
        self.pricing
    }

    /// Per-shop shipping line for the order summary panel.
    #[must_use]
    pub fn shipping_preview(&self) -> Vec<(SellerRef, Vnd)> {
        let selection = select_everything(&self.shops);
        self.shops
            .iter()
            .map(|g| (g.shop.clone(), shipping_for_group(g, &selection)))
            .collect()
    }

    /// Validate the delivery form and build the order-creation request.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] naming the first offending
    /// field: blank or over-long address, malformed phone number, or
    /// over-long notes. The caller redisplays the form with the message.
    pub fn build_request(
        &self,
        address: &str,
        phone: &str,
        payment_method: PaymentMethod,
        notes: Option<&str>,
    ) -> Result<CheckoutRequest> {
        let address = address.trim();
        if address.is_empty() {
            return Err(StorefrontError::validation(
                "shippingAddress",
                "shipping address is required",
            ));
        }
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(StorefrontError::validation(
                "shippingAddress",
                format!("shipping address must be at most {MAX_ADDRESS_LEN} characters"),
            ));
        }

        let phone_number = PhoneNumber::parse(phone)
            .map_err(|e| StorefrontError::validation("phoneNumber", e.to_string()))?;

        let notes = match notes.map(str::trim) {
            None | Some("") => None,
            Some(n) if n.chars().count() > MAX_NOTES_LEN => {
                return Err(StorefrontError::validation(
                    "notes",
                    format!("notes must be at most {MAX_NOTES_LEN} characters"),
                ));
            }
            Some(n) => Some(n.to_string()),
        };

        Ok(CheckoutRequest {
            shipping_address: address.to_string(),
            phone_number,
            payment_method,
            notes,
        })
    }

    /// Submit the order.
    ///
    /// No retry: checkout is not idempotent without a dedup token, so a
    /// failed attempt is surfaced and the user re-triggers it.
    ///
    /// # Errors
    ///
    /// Server rejections pass their message through verbatim; transport
    /// failures surface as [`StorefrontError::Network`].
    pub async fn submit<B: CommerceBackend>(
        &self,
        backend: &B,
        request: &CheckoutRequest,
    ) -> Result<OrderConfirmation> {
        backend.submit_checkout(request).await
    }
}

/// Totals over a handed-off subset, where every item counts as selected.
fn recompute_pricing(shops: &[ShopGroup]) -> PricingSnapshot {
    let selection = select_everything(shops);
    compute_totals(shops, &selection, &NoVouchers)
}

fn select_everything(shops: &[ShopGroup]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    selection.toggle_all(shops);
    selection
}
