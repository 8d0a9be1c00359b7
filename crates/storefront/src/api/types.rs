//! Wire types for the commerce backend's JSON API.
//!
//! Every endpoint wraps its payload in the same `{success, message, data}`
//! envelope. Field shapes here mirror the wire exactly (camelCase, many
//! optionals); normalization into the stable domain types happens in
//! [`super::conversions`], never in pricing or order logic.

use chrono::{DateTime, Utc};
use mekong_core::{LineItemId, OrderId, ProductId, Vnd};
use mekong_core::{DeliveryStatus, OrderStatus, PaymentMethod};
use serde::Deserialize;

/// Standard response envelope.
///
/// `message` and `data` deserialize to `None` when absent; no `Default`
/// bound on `T` is involved, so any payload type works.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// `GET /cart` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItemDto>,
}

/// One cart row as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: LineItemId,
    pub quantity: u32,
    pub price: Vnd,
    #[serde(default)]
    pub variant_label: Option<String>,
    /// Absent when the referenced product was deleted server-side.
    #[serde(default)]
    pub product: Option<ProductDto>,
}

/// Product summary embedded in cart and order rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub original_price: Option<Vnd>,
    #[serde(default)]
    pub free_ship: Option<bool>,
}

/// Spring-style page wrapper used by the order-history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDto<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// One order as the backend returns it, for both list and detail views.
///
/// The list endpoint names the line-item array `items` while the detail
/// endpoint names it `orderItems`; the alias absorbs the difference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: OrderId,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub delivery_status: Option<DeliveryStatus>,
    #[serde(default, alias = "orderItems")]
    pub items: Vec<OrderItemDto>,
    #[serde(default)]
    pub total_amount: Option<Vnd>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One order line as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub quantity: u32,
    pub price: Vnd,
    #[serde(default)]
    pub product: Option<ProductDto>,
}

/// `POST /orders/checkout` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponseDto {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
}
