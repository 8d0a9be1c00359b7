//! Authenticated-user session seam.
//!
//! The cart and checkout flows never manage credentials themselves; they ask
//! an [`AuthSession`] whether a user is present and pull profile defaults
//! (shipping address, phone) from it. Hosts plug in their own session
//! provider behind this trait.

use mekong_core::UserId;

/// Profile data for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    /// Saved shipping address, if the user has one on file.
    pub shipping_address: Option<String>,
    /// Saved phone number as entered; validated again at checkout.
    pub phone: Option<String>,
}

impl UserProfile {
    /// The address to prefill the checkout form with, if any.
    #[must_use]
    pub fn default_shipping_address(&self) -> Option<&str> {
        self.shipping_address.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Read-only view of the current authentication state.
pub trait AuthSession {
    /// Whether a user is signed in.
    fn is_authenticated(&self) -> bool;

    /// Whether the signed-in user has completed account verification.
    ///
    /// Defaults to the authentication state for providers that do not
    /// distinguish the two.
    fn is_verified(&self) -> bool {
        self.is_authenticated()
    }

    /// The signed-in user's profile, or `None` when anonymous.
    fn user(&self) -> Option<&UserProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shipping_address_skips_blank() {
        let profile = UserProfile {
            id: UserId::new(1),
            display_name: "Linh".to_string(),
            shipping_address: Some("   ".to_string()),
            phone: None,
        };
        assert_eq!(profile.default_shipping_address(), None);

        let profile = UserProfile {
            shipping_address: Some("12 Nguyen Hue, District 1".to_string()),
            ..profile
        };
        assert_eq!(
            profile.default_shipping_address(),
            Some("12 Nguyen Hue, District 1")
        );
    }
}
