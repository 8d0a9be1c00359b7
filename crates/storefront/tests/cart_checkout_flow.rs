//! End-to-end cart and checkout flow tests against an in-memory backend.
//!
//! These tests drive the real session, composer, and order types through
//! the `CommerceBackend` seam, with the backend replaced by a fake that
//! mimics the remote API's behavior (authoritative cart state, full
//! re-fetch after each mutation).

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use mekong_core::{
    DeliveryStatus, LineItemId, OrderDisplayStatus, OrderId, OrderStatus, PaymentMethod,
    ProductId, ShopId, Vnd,
};
use mekong_storefront::api::CommerceBackend;
use mekong_storefront::cart::{
    CartAccess, CartEntry, CartSession, Confirmation, LineItem, SellerRef,
};
use mekong_storefront::checkout::{
    CheckoutComposer, CheckoutEntry, CheckoutRequest, OrderConfirmation, PostCheckoutView,
};
use mekong_storefront::error::{Result, StorefrontError};
use mekong_storefront::orders::{OrderBook, OrderDetail, OrderLine, OrderSummary};
use mekong_storefront::session::{AuthSession, UserProfile};

// =============================================================================
// Fakes
// =============================================================================

struct FakeAuth {
    user: Option<UserProfile>,
}

impl FakeAuth {
    fn signed_in() -> Self {
        Self {
            user: Some(UserProfile {
                id: mekong_core::UserId::new(1),
                display_name: "Linh".to_string(),
                shipping_address: Some("12 Nguyen Hue, District 1".to_string()),
                phone: Some("0912345678".to_string()),
            }),
        }
    }

    fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthSession for FakeAuth {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

#[derive(Default)]
struct FakeBackendState {
    cart: Vec<CartEntry>,
    orders: Vec<OrderDetail>,
    next_order_id: i64,
    fail_next_update: bool,
}

/// In-memory stand-in for the commerce API.
struct FakeBackend {
    state: Mutex<FakeBackendState>,
}

impl FakeBackend {
    fn with_cart(cart: Vec<CartEntry>) -> Self {
        Self {
            state: Mutex::new(FakeBackendState {
                cart,
                next_order_id: 100,
                ..FakeBackendState::default()
            }),
        }
    }

    fn fail_next_update(&self) {
        self.state.lock().unwrap().fail_next_update = true;
    }
}

impl CommerceBackend for &FakeBackend {
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>> {
        Ok(self.state.lock().unwrap().cart.clone())
    }

    async fn update_cart_item(&self, item: LineItemId, quantity: u32) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next_update {
            state.fail_next_update = false;
            return Err(StorefrontError::Network("connection reset".to_string()));
        }
        let row = state
            .cart
            .iter_mut()
            .find(|e| e.item.id == item)
            .ok_or_else(|| StorefrontError::NotFound(format!("cart item {item}")))?;
        row.item.quantity = quantity;
        Ok(())
    }

    async fn remove_cart_item(&self, item: LineItemId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.cart.len();
        state.cart.retain(|e| e.item.id != item);
        if state.cart.len() == before {
            return Err(StorefrontError::NotFound(format!("cart item {item}")));
        }
        Ok(())
    }

    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<OrderConfirmation> {
        let mut state = self.state.lock().unwrap();
        state.next_order_id += 1;
        let id = OrderId::new(state.next_order_id);

        let items: Vec<OrderLine> = state
            .cart
            .iter()
            .map(|e| OrderLine {
                product_id: e.item.product_id,
                name: e.item.name.clone(),
                image_url: e.item.image_url.clone(),
                unit_price: e.item.unit_price,
                quantity: e.item.quantity,
            })
            .collect();
        let total: Vnd = items.iter().map(|i| i.unit_price * i.quantity).sum();
        let shop_name = state
            .cart
            .first()
            .and_then(|e| e.seller.as_ref().map(|s| s.name.clone()));

        state.orders.push(OrderDetail {
            summary: OrderSummary {
                id,
                order_status: OrderStatus::Pending,
                delivery_status: None,
                shop_name,
                total,
                payment_method: Some(request.payment_method),
                created_at: None,
                items,
            },
            shipping_address: Some(request.shipping_address.clone()),
            phone_number: Some(request.phone_number.to_string()),
            notes: request.notes.clone(),
            cancellation_reason: None,
        });
        state.cart.clear();

        Ok(OrderConfirmation {
            order_id: id,
            order_number: Some(format!("MM-{:04}", state.next_order_id)),
            payment_method: request.payment_method,
        })
    }

    async fn fetch_orders(&self, _page: u32, _size: u32) -> Result<Vec<OrderSummary>> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().rev().map(|o| o.summary.clone()).collect())
    }

    async fn fetch_order(&self, order: OrderId) -> Result<OrderDetail> {
        let state = self.state.lock().unwrap();
        state
            .orders
            .iter()
            .find(|o| o.summary.id == order)
            .cloned()
            .ok_or_else(|| StorefrontError::NotFound(format!("order {order}")))
    }

    async fn cancel_order(&self, order: OrderId, reason: Option<&str>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let detail = state
            .orders
            .iter_mut()
            .find(|o| o.summary.id == order)
            .ok_or_else(|| StorefrontError::NotFound(format!("order {order}")))?;
        detail.summary.order_status = OrderStatus::Cancelled;
        detail.cancellation_reason = reason.map(String::from);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn entry(
    shop: Option<(i64, &str)>,
    item_id: i64,
    price_dong: i64,
    quantity: u32,
    free_ship: bool,
) -> CartEntry {
    CartEntry {
        seller: shop.map(|(id, name)| SellerRef {
            id: ShopId::new(id),
            name: name.to_string(),
        }),
        item: LineItem {
            id: LineItemId::new(item_id),
            product_id: ProductId::new(item_id * 10),
            name: format!("item-{item_id}"),
            variant_label: String::new(),
            image_url: None,
            unit_price: Vnd::from_dong(price_dong),
            original_price: Vnd::from_dong(price_dong),
            quantity,
            stock: 10,
            free_ship,
        },
    }
}

/// Shop A: one item at 100,000 x2, paid shipping.
/// Shop B: one item at 50,000 x1, free shipping.
fn two_shop_cart() -> Vec<CartEntry> {
    vec![
        entry(Some((1, "Shop A")), 1, 100_000, 2, false),
        entry(Some((2, "Shop B")), 2, 50_000, 1, true),
    ]
}

async fn open_cart(backend: &FakeBackend) -> CartSession<&FakeBackend> {
    match CartSession::open(backend, &FakeAuth::signed_in()).await.unwrap() {
        CartAccess::Open(session) => session,
        CartAccess::RedirectToLogin => panic!("signed-in user should reach the cart"),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_anonymous_user_is_redirected_to_login() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let access = CartSession::open(&backend, &FakeAuth::anonymous())
        .await
        .unwrap();
    assert!(matches!(access, CartAccess::RedirectToLogin));
}

#[tokio::test]
async fn test_full_checkout_flow_with_two_shops() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    assert_eq!(session.groups().len(), 2);

    session.toggle_select_all();
    let totals = session.totals();
    assert_eq!(totals.subtotal, Vnd::from_dong(250_000));
    assert_eq!(totals.shipping, Vnd::from_dong(30_000));
    assert_eq!(totals.discount, Vnd::ZERO);
    assert_eq!(totals.total, Vnd::from_dong(280_000));

    let handoff = session.begin_checkout().expect("selection is non-empty");
    assert_eq!(handoff.pricing, Some(totals));

    let composer = match CheckoutComposer::enter(Some(handoff)) {
        CheckoutEntry::Compose(c) => c,
        CheckoutEntry::RedirectToCart => panic!("handoff should compose"),
    };
    assert_eq!(composer.pricing().total, Vnd::from_dong(280_000));

    let request = composer
        .build_request(
            "12 Nguyen Hue, District 1",
            "0912345678",
            PaymentMethod::Qr,
            Some("call on arrival"),
        )
        .unwrap();
    let confirmation = composer.submit(&&backend, &request).await.unwrap();
    assert_eq!(
        confirmation.next_view(),
        PostCheckoutView::ShowQr(confirmation.order_id)
    );

    // The new order lands in history, displaying as pending.
    let orders = OrderBook::new(&backend);
    let history = orders.history(0, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].display_status(), OrderDisplayStatus::Pending);
    assert_eq!(history[0].total, Vnd::from_dong(250_000));

    let detail = orders.detail(confirmation.order_id).await.unwrap();
    assert_eq!(
        detail.shipping_address.as_deref(),
        Some("12 Nguyen Hue, District 1")
    );
    assert_eq!(detail.notes.as_deref(), Some("call on arrival"));
}

#[tokio::test]
async fn test_checkout_without_selection_is_blocked() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let session = open_cart(&backend).await;
    assert!(session.begin_checkout().is_none());
}

#[tokio::test]
async fn test_set_quantity_refetches_and_raises_totals() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    session.toggle_select_all();
    let before = session.totals();

    session
        .set_quantity(ShopId::new(1), LineItemId::new(1), 3)
        .await
        .unwrap();

    let after = session.totals();
    assert_eq!(after.subtotal, before.subtotal + Vnd::from_dong(100_000));
    assert!(after.total >= before.total);
    assert_eq!(session.groups()[0].items[0].quantity, 3);
}

#[tokio::test]
async fn test_set_quantity_below_one_is_a_no_op() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    session
        .set_quantity(ShopId::new(1), LineItemId::new(1), 0)
        .await
        .unwrap();
    assert_eq!(session.groups()[0].items[0].quantity, 2);
}

#[tokio::test]
async fn test_updating_stale_row_surfaces_not_found() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;

    // Row no longer exists server-side: the call still goes out and the
    // backend's rejection comes back as NotFound, prompting a refresh.
    let err = session
        .set_quantity(ShopId::new(1), LineItemId::new(99), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound(_)));

    session.refresh().await.unwrap();
    assert_eq!(session.groups().len(), 2);
}

#[tokio::test]
async fn test_failed_update_keeps_prior_state() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    session.toggle_select_all();
    let before = session.totals();

    backend.fail_next_update();
    let err = session
        .set_quantity(ShopId::new(1), LineItemId::new(1), 5)
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    assert_eq!(session.groups()[0].items[0].quantity, 2);
    assert_eq!(session.totals(), before);
}

#[tokio::test]
async fn test_declined_removal_changes_nothing() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    let removed = session
        .remove_item(ShopId::new(1), LineItemId::new(1), Confirmation::Declined)
        .await
        .unwrap();
    assert!(!removed);
    assert_eq!(session.groups().len(), 2);
}

#[tokio::test]
async fn test_confirmed_removal_drops_group_and_prunes_selection() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    session.toggle_select_all();

    let removed = session
        .remove_item(ShopId::new(1), LineItemId::new(1), Confirmation::Confirmed)
        .await
        .unwrap();
    assert!(removed);

    // Shop A's only item is gone, so the whole group disappears and its
    // selection key with it.
    assert_eq!(session.groups().len(), 1);
    assert_eq!(session.groups()[0].shop.name, "Shop B");
    assert_eq!(session.selection().len(), 1);
    assert!(
        session
            .selection()
            .is_selected(ShopId::new(2), LineItemId::new(2))
    );

    // Remaining selected item is free-ship, so no shipping at all.
    let totals = session.totals();
    assert_eq!(totals.subtotal, Vnd::from_dong(50_000));
    assert_eq!(totals.shipping, Vnd::ZERO);
}

#[tokio::test]
async fn test_removing_missing_item_surfaces_not_found() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    let err = session
        .remove_item(ShopId::new(1), LineItemId::new(99), Confirmation::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound(_)));
}

#[tokio::test]
async fn test_cancel_order_flow() {
    let backend = FakeBackend::with_cart(two_shop_cart());
    let mut session = open_cart(&backend).await;
    session.toggle_select_all();
    let composer = match CheckoutComposer::enter(session.begin_checkout()) {
        CheckoutEntry::Compose(c) => c,
        CheckoutEntry::RedirectToCart => panic!("handoff should compose"),
    };
    let request = composer
        .build_request("12 Nguyen Hue", "0912345678", PaymentMethod::Cod, None)
        .unwrap();
    let confirmation = composer.submit(&&backend, &request).await.unwrap();

    let orders = OrderBook::new(&backend);

    // Declined gate: nothing happens.
    let cancelled = orders
        .cancel(confirmation.order_id, Some("typo"), Confirmation::Declined)
        .await
        .unwrap();
    assert!(!cancelled);

    // Over-long reason is rejected client-side.
    let err = orders
        .cancel(
            confirmation.order_id,
            Some(&"x".repeat(501)),
            Confirmation::Confirmed,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Validation {
            field: "cancellationReason",
            ..
        }
    ));

    // Confirmed cancel lands, and the order now displays as cancelled even
    // if delivery later reports movement.
    let cancelled = orders
        .cancel(
            confirmation.order_id,
            Some("ordered the wrong size"),
            Confirmation::Confirmed,
        )
        .await
        .unwrap();
    assert!(cancelled);

    let mut detail = orders.detail(confirmation.order_id).await.unwrap();
    assert_eq!(
        detail.cancellation_reason.as_deref(),
        Some("ordered the wrong size")
    );
    detail.summary.delivery_status = Some(DeliveryStatus::Shipping);
    assert_eq!(
        detail.summary.display_status(),
        OrderDisplayStatus::Cancelled
    );
}
