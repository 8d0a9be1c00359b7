//! Grouping of flat cart rows into per-shop groups.

use mekong_core::ShopId;

use super::{CartEntry, SellerRef, ShopGroup};

/// Display name for the fallback group holding seller-less items.
pub const FALLBACK_SHOP_NAME: &str = "Shop";

/// Group a flat sequence of cart rows by seller, preserving first-seen
/// shop order and within-shop row order.
///
/// Rows without a seller reference collect under a fallback group keyed by
/// [`ShopId::FALLBACK`]. Pure and idempotent: regrouping the flattened
/// output reproduces the same groups.
#[must_use]
pub fn group_by_shop(entries: Vec<CartEntry>) -> Vec<ShopGroup> {
    let mut groups: Vec<ShopGroup> = Vec::new();
    for entry in entries {
        let seller = entry.seller.unwrap_or_else(|| SellerRef {
            id: ShopId::FALLBACK,
            name: FALLBACK_SHOP_NAME.to_string(),
        });
        match groups.iter_mut().find(|g| g.shop.id == seller.id) {
            Some(group) => group.items.push(entry.item),
            None => groups.push(ShopGroup {
                shop: seller,
                items: vec![entry.item],
            }),
        }
    }
    groups
}
