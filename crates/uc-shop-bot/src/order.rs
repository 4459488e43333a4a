//! Orders derived from a finished session.

use crate::catalog;
use crate::error::{AppError, AppResult};

/// Everything needed to request a payment link. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub user_id: i64,
    pub package_id: String,
    pub price: u32,
    /// In-game identifier exactly as the buyer typed it.
    pub game_id: String,
    /// `<user id>_<package id>`, echoed back by the gateway webhook.
    pub reference: String,
    /// Synthetic contact address the gateway requires.
    pub email: String,
}

impl Order {
    /// Build an order, failing if the package is not in the catalog.
    pub fn new(
        user_id: i64,
        package_id: &str,
        game_id: &str,
        email_domain: &str,
    ) -> AppResult<Self> {
        let price = catalog::price_of(package_id)
            .ok_or_else(|| AppError::UnknownPackage(package_id.to_string()))?;

        Ok(Self {
            user_id,
            package_id: package_id.to_string(),
            price,
            game_id: game_id.to_string(),
            reference: format!("{}_{}", user_id, package_id),
            email: format!("{}@{}", user_id, email_domain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_fields() {
        let order = Order::new(42, "60", "12345", "ucshop.pro").unwrap();

        assert_eq!(order.price, 70);
        assert_eq!(order.reference, "42_60");
        assert_eq!(order.email, "42@ucshop.pro");
        assert_eq!(order.game_id, "12345");
    }

    #[test]
    fn test_order_accepts_empty_game_id() {
        let order = Order::new(42, "1800", "", "ucshop.pro").unwrap();
        assert_eq!(order.game_id, "");
        assert_eq!(order.price, 1650);
    }

    #[test]
    fn test_order_unknown_package() {
        let result = Order::new(42, "999", "12345", "ucshop.pro");
        assert!(matches!(result, Err(AppError::UnknownPackage(id)) if id == "999"));
    }
}
