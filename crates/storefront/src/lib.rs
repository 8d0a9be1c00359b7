//! Mekong Market storefront library.
//!
//! Customer-facing cart, checkout, and order flows over a remote commerce
//! API. The crate owns the grouped cart view with its selection state and
//! derived pricing, the checkout composition with its validation and frozen
//! pricing handoff, and the order history/detail/cancel operations.
//! Rendering, routing, persistence, and session management belong to the
//! embedding application; the seams are [`api::CommerceBackend`] and
//! [`session::AuthSession`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;

pub use error::{Result, StorefrontError};
