//! Mekong Core - Shared types library.
//!
//! This crate provides common types used across all Mekong Market components:
//! - `storefront` - Customer-facing cart/checkout/order core
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, VND money, phone numbers,
//!   and order status enums (including the display-status projection)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
