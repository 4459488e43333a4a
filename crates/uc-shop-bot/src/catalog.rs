//! Fixed UC package catalog.

/// Callback data of the "buy" button under the welcome message.
pub const MENU_ACTION: &str = "buy_menu";

/// Prefix of per-package callback data, e.g. `buy_60`.
pub const BUY_PREFIX: &str = "buy_";

/// A purchasable amount of UC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub id: &'static str,
    /// Price in rubles.
    pub price: u32,
}

impl Package {
    /// Button label, e.g. `60 UC – 70₽`.
    pub fn label(&self) -> String {
        format!("{} UC – {}₽", self.id, self.price)
    }

    /// Callback data selecting this package.
    pub fn action(&self) -> String {
        format!("{}{}", BUY_PREFIX, self.id)
    }
}

pub static PACKAGES: [Package; 4] = [
    Package { id: "60", price: 70 },
    Package { id: "325", price: 320 },
    Package { id: "660", price: 610 },
    Package { id: "1800", price: 1650 },
];

pub fn find(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}

pub fn price_of(id: &str) -> Option<u32> {
    find(id).map(|p| p.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_match_table() {
        assert_eq!(price_of("60"), Some(70));
        assert_eq!(price_of("325"), Some(320));
        assert_eq!(price_of("660"), Some(610));
        assert_eq!(price_of("1800"), Some(1650));
    }

    #[test]
    fn test_unknown_package() {
        assert_eq!(price_of("999"), None);
        assert_eq!(price_of(""), None);
        assert_eq!(price_of("menu"), None);
    }

    #[test]
    fn test_labels_and_actions() {
        let labels: Vec<String> = PACKAGES.iter().map(Package::label).collect();
        assert_eq!(
            labels,
            ["60 UC – 70₽", "325 UC – 320₽", "660 UC – 610₽", "1800 UC – 1650₽"]
        );
        assert_eq!(PACKAGES[3].action(), "buy_1800");
    }

    #[test]
    fn test_no_package_collides_with_menu_action() {
        assert!(PACKAGES.iter().all(|p| p.action() != MENU_ACTION));
    }
}
