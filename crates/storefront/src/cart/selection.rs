//! Per-item selection state for the cart view.
//!
//! Keys are compound `(ShopId, LineItemId)` pairs because line-item ids are
//! only guaranteed unique within one shop group of the aggregated view.
//! "All selected" at shop or cart level is always derived from the set, not
//! stored, so it cannot drift from the underlying membership.

use std::collections::HashSet;

use mekong_core::{LineItemId, ShopId};

use super::ShopGroup;

/// Set of currently selected line items, scoped to one cart view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<(ShopId, LineItemId)>,
}

impl SelectionSet {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a specific line item is selected.
    #[must_use]
    pub fn is_selected(&self, shop: ShopId, item: LineItemId) -> bool {
        self.selected.contains(&(shop, item))
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip membership of one line item.
    pub fn toggle_item(&mut self, shop: ShopId, item: LineItemId) {
        let key = (shop, item);
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    /// Whether every item of `group` is selected.
    #[must_use]
    pub fn shop_all_selected(&self, group: &ShopGroup) -> bool {
        group
            .items
            .iter()
            .all(|i| self.is_selected(group.shop.id, i.id))
    }

    /// Whether every item of every group is selected.
    #[must_use]
    pub fn all_selected(&self, groups: &[ShopGroup]) -> bool {
        groups.iter().all(|g| self.shop_all_selected(g))
    }

    /// All-or-nothing toggle for one shop: select every item in the group
    /// unless all are already selected, in which case deselect them all.
    pub fn toggle_shop(&mut self, group: &ShopGroup) {
        if self.shop_all_selected(group) {
            for item in &group.items {
                self.selected.remove(&(group.shop.id, item.id));
            }
        } else {
            for item in &group.items {
                self.selected.insert((group.shop.id, item.id));
            }
        }
    }

    /// All-or-nothing toggle across every shop.
    pub fn toggle_all(&mut self, groups: &[ShopGroup]) {
        if self.all_selected(groups) {
            self.selected.clear();
        } else {
            for group in groups {
                for item in &group.items {
                    self.selected.insert((group.shop.id, item.id));
                }
            }
        }
    }

    /// Drop keys that no longer reference an extant line item.
    ///
    /// Called after every mutation that could invalidate keys (removal,
    /// server re-fetch), keeping the pruning invariant.
    pub fn prune(&mut self, groups: &[ShopGroup]) {
        self.selected.retain(|(shop, item)| {
            groups
                .iter()
                .any(|g| g.shop.id == *shop && g.items.iter().any(|i| i.id == *item))
        });
    }
}
