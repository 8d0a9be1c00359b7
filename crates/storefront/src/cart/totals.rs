//! Pricing for the selected cart subset.
//!
//! Totals are always derived from `(groups, selection)` on demand; nothing
//! here caches. Shipping is evaluated per shop group: a group with at least
//! one selected item contributes a flat fee unless every selected item in
//! it ships free. Discounts come from an external voucher source and are
//! clamped so the total never goes negative.

use mekong_core::Vnd;

use super::selection::SelectionSet;
use super::ShopGroup;

/// Flat per-shop shipping fee in dong, charged once per shop with any
/// selected non-free-ship item.
pub const FLAT_SHOP_SHIPPING_DONG: i64 = 30_000;

/// Derived pricing for the selected subset. Never stored; recomputed from
/// source state or carried as a frozen snapshot across the checkout
/// navigation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    pub subtotal: Vnd,
    pub shipping: Vnd,
    pub discount: Vnd,
    pub total: Vnd,
}

/// Source of per-shop voucher discounts.
///
/// The storefront carries no voucher issuance or validation logic; an
/// external service implements this trait when vouchers exist. The default
/// [`NoVouchers`] contributes nothing.
pub trait VoucherSource {
    /// Discount for one shop group, given the subtotal of its selected items.
    fn discount_for(&self, group: &ShopGroup, selected_subtotal: Vnd) -> Vnd;
}

/// Voucher source that never discounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVouchers;

impl VoucherSource for NoVouchers {
    fn discount_for(&self, _group: &ShopGroup, _selected_subtotal: Vnd) -> Vnd {
        Vnd::ZERO
    }
}

/// Shipping contribution of one group given the current selection.
///
/// Zero when the group has no selected items, and zero when every selected
/// item in it is free-ship.
#[must_use]
pub fn shipping_for_group(group: &ShopGroup, selection: &SelectionSet) -> Vnd {
    let mut any_selected = false;
    let mut all_free = true;
    for item in &group.items {
        if selection.is_selected(group.shop.id, item.id) {
            any_selected = true;
            all_free &= item.free_ship;
        }
    }
    if any_selected && !all_free {
        Vnd::from_dong(FLAT_SHOP_SHIPPING_DONG)
    } else {
        Vnd::ZERO
    }
}

/// Compute totals over the selected subset.
///
/// Pure in `(groups, selection, vouchers)`. The discount is applied last and
/// clamped: `total = max(0, subtotal + shipping - discount)`.
#[must_use]
pub fn compute_totals(
    groups: &[ShopGroup],
    selection: &SelectionSet,
    vouchers: &dyn VoucherSource,
) -> PricingSnapshot {
    let mut subtotal = Vnd::ZERO;
    let mut shipping = Vnd::ZERO;
    let mut discount = Vnd::ZERO;

    for group in groups {
        let group_subtotal: Vnd = group
            .items
            .iter()
            .filter(|i| selection.is_selected(group.shop.id, i.id))
            .map(|i| i.unit_price * i.quantity)
            .sum();
        subtotal += group_subtotal;
        shipping += shipping_for_group(group, selection);
        if !group_subtotal.is_zero() {
            discount += vouchers.discount_for(group, group_subtotal);
        }
    }

    let total = (subtotal + shipping).saturating_sub(discount);
    PricingSnapshot {
        subtotal,
        shipping,
        discount,
        total,
    }
}
