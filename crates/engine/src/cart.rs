use serde::{Deserialize, Serialize};

use crate::Money;

/// A purchasable line item. The checkout uses a single synthetic
/// item whose amount is derived from the normalized total, never
/// entered independently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub description: String,
    pub amount: Money,
    pub default_quantity: u32,
}

impl CartItem {
    /// Creates an item, clamping the quantity to at least 1.
    #[must_use]
    pub fn new(name: &str, description: &str, amount: Money, default_quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            amount,
            default_quantity: default_quantity.max(1),
        }
    }

    /// The synthetic whole-purchase item.
    #[must_use]
    pub fn purchase(amount: Money) -> Self {
        Self::new("Pagamento da compra", "Pagamento da compra", amount, 1)
    }
}

impl Default for CartItem {
    fn default() -> Self {
        Self::purchase(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_is_never_zero() {
        let item = CartItem::new("Item", "Item", Money::new(100), 0);
        assert_eq!(item.default_quantity, 1);
    }

    #[test]
    fn purchase_item_carries_the_whole_amount() {
        let item = CartItem::purchase(Money::new(123_456));
        assert_eq!(item.amount.minor(), 123_456);
        assert_eq!(item.name, "Pagamento da compra");
    }
}
