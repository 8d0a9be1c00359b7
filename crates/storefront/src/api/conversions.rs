//! Normalization from wire types to the stable domain types.
//!
//! Backend payloads carry optional and inconsistently named fields; this is
//! the one place those ambiguities are resolved. Missing product data gets
//! conservative fallbacks (generic name, zero stock, no free shipping) and
//! a warning, so pricing and grouping logic downstream never sees an
//! optional field.

use mekong_core::{ProductId, ShopId, Vnd};

use super::types::{CartItemDto, OrderDto, OrderItemDto};
use crate::cart::{CartEntry, LineItem, SellerRef};
use crate::orders::{OrderDetail, OrderLine, OrderSummary};

/// Display name used when the product record is gone.
const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

impl From<CartItemDto> for CartEntry {
    fn from(dto: CartItemDto) -> Self {
        let Some(product) = dto.product else {
            tracing::warn!(line_item = %dto.id, "cart row references a missing product");
            return Self {
                seller: None,
                item: LineItem {
                    id: dto.id,
                    product_id: ProductId::new(0),
                    name: UNKNOWN_PRODUCT_NAME.to_string(),
                    variant_label: dto.variant_label.unwrap_or_default(),
                    image_url: None,
                    unit_price: dto.price,
                    original_price: dto.price,
                    quantity: dto.quantity,
                    stock: 0,
                    free_ship: false,
                },
            };
        };

        let seller = product.seller_id.map(|id| SellerRef {
            id: ShopId::new(id),
            name: product
                .seller_name
                .clone()
                .unwrap_or_else(|| crate::cart::FALLBACK_SHOP_NAME.to_string()),
        });

        Self {
            seller,
            item: LineItem {
                id: dto.id,
                product_id: product.id,
                name: product
                    .name
                    .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
                variant_label: dto.variant_label.unwrap_or_default(),
                image_url: product.images.into_iter().next(),
                unit_price: dto.price,
                original_price: product.original_price.unwrap_or(dto.price),
                quantity: dto.quantity,
                stock: product.stock.unwrap_or(0),
                free_ship: product.free_ship.unwrap_or(false),
            },
        }
    }
}

impl From<OrderItemDto> for OrderLine {
    fn from(dto: OrderItemDto) -> Self {
        let (product_id, name, image_url) = match dto.product {
            Some(p) => (
                p.id,
                p.name.unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
                p.images.into_iter().next(),
            ),
            None => (ProductId::new(0), UNKNOWN_PRODUCT_NAME.to_string(), None),
        };
        Self {
            product_id,
            name,
            image_url,
            unit_price: dto.price,
            quantity: dto.quantity,
        }
    }
}

impl From<OrderDto> for OrderSummary {
    fn from(dto: OrderDto) -> Self {
        let line_total: Vnd = dto.items.iter().map(|i| i.price * i.quantity).sum();
        Self {
            id: dto.id,
            order_status: dto.order_status,
            delivery_status: dto.delivery_status,
            shop_name: dto.shop_name,
            total: dto.total_amount.unwrap_or(line_total),
            payment_method: dto.payment_method,
            created_at: dto.created_at,
            items: dto.items.into_iter().map(OrderLine::from).collect(),
        }
    }
}

impl From<OrderDto> for OrderDetail {
    fn from(dto: OrderDto) -> Self {
        let summary = OrderSummary::from(OrderDto {
            shipping_address: None,
            phone_number: None,
            notes: None,
            cancellation_reason: None,
            ..dto.clone()
        });
        Self {
            summary,
            shipping_address: dto.shipping_address,
            phone_number: dto.phone_number,
            notes: dto.notes,
            cancellation_reason: dto.cancellation_reason,
        }
    }
}
