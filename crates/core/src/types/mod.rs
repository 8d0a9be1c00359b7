//! Core types for Mekong Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod phone;
pub mod status;

pub use id::*;
pub use money::Vnd;
pub use phone::{PhoneError, PhoneNumber};
pub use status::*;
