//! Inventory models

use rust_decimal::Decimal;
use validator::Validate;

/// The persisted, validated shape of an inventory row
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct InventoryDraft {
    #[validate(custom = "crate::validation::selling_unit_price_rule")]
    pub selling_unit_price: Decimal,
    pub stock: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selling_price_non_negative() {
        let ok = InventoryDraft {
            selling_unit_price: Decimal::new(1300, 2),
            stock: 10,
        };
        assert!(ok.validate().is_ok());

        let bad = InventoryDraft {
            selling_unit_price: Decimal::new(-1, 2),
            stock: 10,
        };
        assert!(bad.validate().is_err());
    }
}
