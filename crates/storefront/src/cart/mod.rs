//! Cart aggregation: grouped-by-shop view, selection state, derived totals.
//!
//! A [`CartSession`] owns the grouped cart state and the user's selection
//! for one cart view. Every server-backed mutation follows the same policy:
//! call the backend, then re-fetch the authoritative cart in full
//! (last-writer-wins). No optimistic update is applied ahead of server
//! confirmation, so a failed call leaves local state exactly as it was.

pub mod group;
pub mod selection;
pub mod totals;

use mekong_core::{LineItemId, ProductId, ShopId, Vnd};
use tracing::instrument;

use crate::api::CommerceBackend;
use crate::checkout::CheckoutHandoff;
use crate::error::Result;
use crate::session::AuthSession;

pub use group::{FALLBACK_SHOP_NAME, group_by_shop};
pub use selection::SelectionSet;
pub use totals::{
    FLAT_SHOP_SHIPPING_DONG, NoVouchers, PricingSnapshot, VoucherSource, compute_totals,
};

/// One product offer at a specific quantity inside a seller's group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Opaque line-item identifier, stable across quantity updates.
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: String,
    /// Variant description shown under the name; may be empty.
    pub variant_label: String,
    pub image_url: Option<String>,
    pub unit_price: Vnd,
    /// Pre-discount price, at least `unit_price` when a discount applies.
    pub original_price: Vnd,
    pub quantity: u32,
    pub stock: u32,
    pub free_ship: bool,
}

impl LineItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Vnd {
        self.unit_price * self.quantity
    }

    /// Whether the quantity can be raised without exceeding known stock.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.stock
    }

    /// Whether the quantity can be lowered without dropping below one.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

/// A seller reference as displayed in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerRef {
    pub id: ShopId,
    pub name: String,
}

/// One normalized cart row: a line item and its seller, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub seller: Option<SellerRef>,
    pub item: LineItem,
}

/// A seller's line items within one cart or checkout session.
///
/// Never empty: a group whose last item is removed is dropped from the
/// parent collection rather than retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopGroup {
    pub shop: SellerRef,
    pub items: Vec<LineItem>,
}

/// Outcome of a yes/no gate shown before a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Result of opening the cart view.
#[derive(Debug)]
pub enum CartAccess<B> {
    /// No signed-in user; the caller redirects to the login view.
    RedirectToLogin,
    /// Cart loaded and ready.
    Open(CartSession<B>),
}

/// The cart view's state: grouped items plus selection, owned exclusively
/// by the single view instance that renders it.
#[derive(Debug)]
pub struct CartSession<B> {
    backend: B,
    groups: Vec<ShopGroup>,
    selection: SelectionSet,
}

impl<B: CommerceBackend> CartSession<B> {
    /// Open the cart for the current session.
    ///
    /// Anonymous users get [`CartAccess::RedirectToLogin`] without any
    /// backend call; otherwise the cart is fetched and grouped.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial cart fetch fails.
    pub async fn open(backend: B, auth: &dyn AuthSession) -> Result<CartAccess<B>> {
        if !auth.is_authenticated() {
            return Ok(CartAccess::RedirectToLogin);
        }
        let mut session = Self {
            backend,
            groups: Vec::new(),
            selection: SelectionSet::new(),
        };
        session.refresh().await?;
        Ok(CartAccess::Open(session))
    }

    /// Re-fetch the authoritative cart, regroup, and prune stale selection
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; local state is left unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let entries = self.backend.fetch_cart().await?;
        self.groups = group_by_shop(entries);
        self.selection.prune(&self.groups);
        Ok(())
    }

    /// Current shop groups in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[ShopGroup] {
        &self.groups
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Whether the cart holds no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Update one line item's quantity on the server, then re-fetch.
    ///
    /// A `new_quantity` below 1 is a no-op; increment/decrement affordances
    /// clamp at the edges, so out-of-range input never reaches the backend
    /// through them. A stale row goes to the backend anyway: the server's
    /// 404 surfaces as [`crate::StorefrontError::NotFound`] and the caller
    /// refreshes.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; local state keeps its prior
    /// value on failure.
    #[instrument(skip(self), fields(shop = %shop, item = %item))]
    pub async fn set_quantity(
        &mut self,
        shop: ShopId,
        item: LineItemId,
        new_quantity: u32,
    ) -> Result<()> {
        if new_quantity < 1 {
            return Ok(());
        }
        self.backend.update_cart_item(item, new_quantity).await?;
        self.refresh().await
    }

    /// Remove one line item after an explicit confirmation gate.
    ///
    /// Returns `Ok(false)` without any backend call when the user declines.
    /// On success the item is pruned locally (dropping its group if now
    /// empty) and the cart is re-fetched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; local state keeps its prior
    /// value on failure.
    #[instrument(skip(self), fields(item = %item))]
    pub async fn remove_item(
        &mut self,
        shop: ShopId,
        item: LineItemId,
        confirmation: Confirmation,
    ) -> Result<bool> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        self.backend.remove_cart_item(item).await?;
        for g in &mut self.groups {
            if g.shop.id == shop {
                g.items.retain(|i| i.id != item);
            }
        }
        self.groups.retain(|g| !g.items.is_empty());
        self.selection.prune(&self.groups);
        self.refresh().await?;
        Ok(true)
    }

    /// Flip selection of one line item.
    pub fn toggle_item(&mut self, shop: ShopId, item: LineItemId) {
        self.selection.toggle_item(shop, item);
    }

    /// All-or-nothing selection toggle for one shop. Unknown shop ids are
    /// ignored.
    pub fn toggle_shop(&mut self, shop: ShopId) {
        if let Some(group) = self.groups.iter().find(|g| g.shop.id == shop) {
            self.selection.toggle_shop(group);
        }
    }

    /// All-or-nothing selection toggle across the whole cart.
    pub fn toggle_select_all(&mut self) {
        self.selection.toggle_all(&self.groups);
    }

    /// Totals for the currently selected subset.
    #[must_use]
    pub fn totals(&self) -> PricingSnapshot {
        compute_totals(&self.groups, &self.selection, &NoVouchers)
    }

    /// Deep copy of the selected subset, grouped, in display order.
    #[must_use]
    pub fn selected_groups(&self) -> Vec<ShopGroup> {
        self.groups
            .iter()
            .filter_map(|g| {
                let items: Vec<LineItem> = g
                    .items
                    .iter()
                    .filter(|i| self.selection.is_selected(g.shop.id, i.id))
                    .cloned()
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(ShopGroup {
                        shop: g.shop.clone(),
                        items,
                    })
                }
            })
            .collect()
    }

    /// Freeze the selected subset and its pricing for the checkout
    /// navigation. Returns `None` when nothing is selected.
    #[must_use]
    pub fn begin_checkout(&self) -> Option<CheckoutHandoff> {
        if self.selection.is_empty() {
            return None;
        }
        Some(CheckoutHandoff {
            shops: self.selected_groups(),
            pricing: Some(self.totals()),
        })
    }
}
