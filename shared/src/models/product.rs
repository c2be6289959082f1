//! Product models

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// The persisted, validated shape of a product row
///
/// Stock is deliberately absent from the validation rules: negative stock is
/// rejected by the storage CHECK constraint, not here.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ProductDraft {
    #[validate(custom = "crate::validation::product_name_rule")]
    pub name: String,
    pub description: String,
    #[validate(custom = "crate::validation::unit_price_rule")]
    pub unit_price: Decimal,
    pub stock: i32,
    pub active_status: bool,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    pub stock: i32,
    pub active_status: Option<bool>,
}

/// Partial edit of a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
    pub stock: Option<i32>,
    pub active_status: Option<bool>,
}

impl From<NewProduct> for ProductDraft {
    fn from(input: NewProduct) -> Self {
        Self {
            name: input.name,
            description: input.description,
            unit_price: input.unit_price,
            stock: input.stock,
            active_status: input.active_status.unwrap_or(true),
        }
    }
}

impl ProductDraft {
    /// Apply an edit; the result must be validated again before it is persisted
    pub fn apply(self, patch: ProductPatch) -> Self {
        Self {
            name: patch.name.unwrap_or(self.name),
            description: patch.description.unwrap_or(self.description),
            unit_price: patch.unit_price.unwrap_or(self.unit_price),
            stock: patch.stock.unwrap_or(self.stock),
            active_status: patch.active_status.unwrap_or(self.active_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Test Product".to_string(),
            description: "Test description".to_string(),
            unit_price: Decimal::from_str("12.34").unwrap(),
            stock: 50,
            active_status: true,
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_name_required() {
        let product = ProductDraft {
            name: String::new(),
            ..draft()
        };
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_unit_price() {
        let product = ProductDraft {
            unit_price: Decimal::from_str("-5000000.12").unwrap(),
            ..draft()
        };
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("unit_price"));
    }

    #[test]
    fn test_negative_stock_passes_validation() {
        // Enforced by products_stock_check at the storage layer
        let product = ProductDraft {
            stock: -10,
            ..draft()
        };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_new_product_defaults_active() {
        let input: NewProduct = serde_json::from_str(
            r#"{"name":"Bolt","unit_price":"0.50","stock":3}"#,
        )
        .unwrap();
        let draft = ProductDraft::from(input);
        assert!(draft.active_status);
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_patch_can_reactivate() {
        let inactive = ProductDraft {
            stock: 0,
            active_status: false,
            ..draft()
        };
        let edited = inactive.apply(ProductPatch {
            stock: Some(5),
            active_status: Some(true),
            ..Default::default()
        });
        assert_eq!(edited.stock, 5);
        assert!(edited.active_status);
        assert_eq!(edited.name, "Test Product");
    }
}
