//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Backend identifiers
//! are 64-bit integers across every endpoint.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use mekong_core::define_id;
/// define_id!(ShopId);
/// define_id!(OrderId);
///
/// let shop_id = ShopId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ShopId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(LineItemId);
define_id!(ShopId);
define_id!(OrderId);

impl ShopId {
    /// Group key for cart items whose product carries no seller reference.
    ///
    /// The backend occasionally returns cart rows with a null seller; those
    /// items still need a stable shop group in the aggregated view.
    pub const FALLBACK: Self = Self(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let shop = ShopId::new(7);
        let item = LineItemId::new(7);
        assert_eq!(shop.as_i64(), item.as_i64());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderId::new(42).to_string(), "42");
    }

    #[test]
    fn test_serde_transparent() {
        let id: ShopId = serde_json::from_str("5").expect("valid id");
        assert_eq!(id, ShopId::new(5));
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "5");
    }

    #[test]
    fn test_from_into() {
        let id: LineItemId = 9_i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 9);
    }
}
