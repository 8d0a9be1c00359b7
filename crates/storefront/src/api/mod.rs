//! Commerce backend client.
//!
//! [`CommerceBackend`] is the seam between the storefront flows and the
//! remote REST API; [`ApiClient`] is the production implementation over
//! `reqwest`. Tests substitute in-memory fakes. Transport failures never
//! escape raw: every call resolves to a [`StorefrontError`] kind before
//! returning.

pub mod conversions;
pub mod types;

use mekong_core::{LineItemId, OrderId};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::cart::CartEntry;
use crate::checkout::{CheckoutRequest, OrderConfirmation};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::orders::{OrderDetail, OrderSummary};
use types::{ApiEnvelope, CartDto, CheckoutResponseDto, OrderDto, PageDto};

/// Operations the storefront needs from the commerce backend.
///
/// Callers hold a concrete backend; the futures are only awaited on the
/// single-threaded view event loop, so no auto-trait bounds are promised.
#[allow(async_fn_in_trait)]
pub trait CommerceBackend {
    /// Fetch the authoritative cart as normalized rows.
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>>;

    /// Set one line item's quantity.
    async fn update_cart_item(&self, item: LineItemId, quantity: u32) -> Result<()>;

    /// Delete one line item.
    async fn remove_cart_item(&self, item: LineItemId) -> Result<()>;

    /// Create an order from the current cart selection.
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<OrderConfirmation>;

    /// One page of the user's order history, newest first.
    async fn fetch_orders(&self, page: u32, size: u32) -> Result<Vec<OrderSummary>>;

    /// Full detail for one order.
    async fn fetch_order(&self, order: OrderId) -> Result<OrderDetail>;

    /// Cancel one order, with an optional customer-supplied reason.
    async fn cancel_order(&self, order: OrderId, reason: Option<&str>) -> Result<()>;
}

/// `reqwest`-backed implementation of [`CommerceBackend`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// The configured timeout applies to every request; a timeout surfaces
    /// as [`StorefrontError::Network`] like any other transport failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| StorefrontError::Network(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.api_timeout)
            .build()?;

        // Url::join resolves relative to the last '/' segment.
        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StorefrontError::Network(format!("invalid endpoint {path}: {e}")))
    }
}

impl CommerceBackend for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>> {
        let url = self.endpoint("cart")?;
        let response = self.client.get(url).send().await?;
        let cart: CartDto = parse_envelope(response, "cart").await?;
        Ok(cart.items.into_iter().map(CartEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_cart_item(&self, item: LineItemId, quantity: u32) -> Result<()> {
        let url = self.endpoint(&format!("cart/items/{item}"))?;
        let response = self
            .client
            .put(url)
            .query(&[("quantity", quantity)])
            .send()
            .await?;
        check_envelope(response, &format!("cart item {item}")).await
    }

    #[instrument(skip(self))]
    async fn remove_cart_item(&self, item: LineItemId) -> Result<()> {
        let url = self.endpoint(&format!("cart/items/{item}"))?;
        let response = self.client.delete(url).send().await?;
        check_envelope(response, &format!("cart item {item}")).await
    }

    #[instrument(skip(self, request))]
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<OrderConfirmation> {
        let url = self.endpoint("orders/checkout")?;
        let response = self.client.post(url).json(request).send().await?;
        let created: CheckoutResponseDto = parse_envelope(response, "checkout").await?;
        Ok(OrderConfirmation {
            order_id: created.id,
            order_number: created.order_number,
            payment_method: request.payment_method,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_orders(&self, page: u32, size: u32) -> Result<Vec<OrderSummary>> {
        let url = self.endpoint("orders/my-orders")?;
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        let orders: PageDto<OrderDto> = parse_envelope(response, "orders").await?;
        Ok(orders.content.into_iter().map(OrderSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_order(&self, order: OrderId) -> Result<OrderDetail> {
        let url = self.endpoint(&format!("orders/{order}"))?;
        let response = self.client.get(url).send().await?;
        let dto: OrderDto = parse_envelope(response, &format!("order {order}")).await?;
        Ok(OrderDetail::from(dto))
    }

    #[instrument(skip(self))]
    async fn cancel_order(&self, order: OrderId, reason: Option<&str>) -> Result<()> {
        let url = self.endpoint(&format!("orders/{order}/cancel"))?;
        let body = serde_json::json!({ "cancellationReason": reason });
        let response = self.client.put(url).json(&body).send().await?;
        check_envelope(response, &format!("order {order}")).await
    }
}

// =============================================================================
// Response handling
// =============================================================================

/// Map an HTTP response onto the error taxonomy and extract `data`.
///
/// 404 becomes `NotFound`; other 4xx carry a server validation message;
/// 5xx and transport failures are `Network`. A 2xx envelope with
/// `success: false` is a server-side rejection even though the transport
/// succeeded.
async fn parse_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T> {
    let envelope: ApiEnvelope<T> = read_envelope(response, what).await?;
    envelope
        .data
        .ok_or_else(|| StorefrontError::Network(format!("response for {what} carried no data")))
}

/// Like [`parse_envelope`] for endpoints whose `data` payload is not used.
async fn check_envelope(response: reqwest::Response, what: &str) -> Result<()> {
    let _: ApiEnvelope<serde_json::Value> = read_envelope(response, what).await?;
    Ok(())
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<ApiEnvelope<T>> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(StorefrontError::NotFound(what.to_string()));
    }
    if status.is_client_error() {
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| format!("request for {what} was rejected ({status})"));
        return Err(StorefrontError::ServerValidation(message));
    }
    if status.is_server_error() {
        return Err(StorefrontError::Network(format!(
            "backend error for {what}: {status}"
        )));
    }

    let envelope: ApiEnvelope<T> = response
        .json()
        .await
        .map_err(|e| StorefrontError::Network(format!("malformed response for {what}: {e}")))?;

    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| format!("request for {what} failed"));
        return Err(StorefrontError::ServerValidation(message));
    }
    Ok(envelope)
}
