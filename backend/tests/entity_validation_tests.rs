//! Entity validation tests
//!
//! Tests for supplier, product and inventory rules including:
//! - Field rules enforced on every persisted shape
//! - Edits re-validated after they are applied
//! - Storage constraint names mapped back to fields
//! - Listing pagination bounds

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    constraint_field, InventoryDraft, NewProduct, ProductDraft, ProductPatch, SupplierDraft,
    SupplierPatch, SupplierRegistration,
};
use shared::types::{Pagination, PaginatedResponse, MAX_PER_PAGE};
use shared::validation::{
    first_field_error, validate_phone_number, validate_product_name, validate_unit_price,
    PHONE_NUMBER_MAX_LEN, PRODUCT_NAME_MAX_LEN,
};
use std::str::FromStr;
use validator::Validate;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(name: &str, unit_price: &str, stock: i32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: String::new(),
        unit_price: dec(unit_price),
        stock,
        active_status: true,
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn phone_strategy() -> impl Strategy<Value = String> {
    "\\+?[0-9]{6,19}"
}

fn product_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,60}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Phone numbers up to 20 characters are accepted, longer ones rejected
    #[test]
    fn test_phone_number_length(phone in phone_strategy(), extra in 1usize..10) {
        prop_assert!(validate_phone_number(&phone).is_ok());

        let too_long = "9".repeat(PHONE_NUMBER_MAX_LEN + extra);
        prop_assert!(validate_phone_number(&too_long).is_err());
    }

    /// Any price of at least one cent is accepted
    #[test]
    fn test_unit_price_minimum(cents in 1i64..100_000_000) {
        prop_assert!(validate_unit_price(Decimal::new(cents, 2)).is_ok());
        prop_assert!(validate_unit_price(Decimal::new(1 - cents, 2)).is_err());
    }

    /// Valid products stay valid after a patch that only touches stock or status
    #[test]
    fn test_product_patch_stock_only(
        name in product_name_strategy(),
        stock in 0i32..10_000,
        new_stock in 0i32..10_000,
        active in any::<bool>(),
    ) {
        let draft = product(&name, "10.00", stock);
        prop_assert!(draft.validate().is_ok());

        let patched = draft.apply(ProductPatch {
            stock: Some(new_stock),
            active_status: Some(active),
            ..Default::default()
        });
        prop_assert!(patched.validate().is_ok());
        prop_assert_eq!(patched.stock, new_stock);
        prop_assert_eq!(patched.active_status, active);
        prop_assert_eq!(patched.name, name);
    }

    /// Page size is always clamped into 1..=MAX_PER_PAGE and page to at least 1
    #[test]
    fn test_pagination_bounds(page in any::<Option<u32>>(), per_page in any::<Option<u32>>()) {
        let pagination = Pagination::from_query(page, per_page);

        prop_assert!(pagination.page >= 1);
        prop_assert!((1..=MAX_PER_PAGE).contains(&pagination.per_page));
        prop_assert!(pagination.offset() >= 0);
        prop_assert_eq!(
            pagination.offset(),
            i64::from(pagination.page - 1) * pagination.limit()
        );
    }

    /// Total pages cover every item
    #[test]
    fn test_pagination_total_pages(per_page in 1u32..=100, total in 0u64..10_000) {
        let pagination = Pagination::from_query(Some(1), Some(per_page));
        let response = PaginatedResponse::<()>::new(vec![], &pagination, total);

        let pages = u64::from(response.pagination.total_pages);
        prop_assert!(pages * u64::from(per_page) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(per_page) < total);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_supplier_phone_is_required() {
        let draft = SupplierDraft {
            phone_number: "   ".to_string(),
            address: "12 Market Street".to_string(),
        };

        let errors = draft.validate().unwrap_err();
        let field_error = first_field_error(&errors).unwrap();
        assert_eq!(field_error.field, "phone_number");
        assert_eq!(field_error.message, "Phone number is required");
    }

    #[test]
    fn test_supplier_patch_is_revalidated() {
        let draft = SupplierDraft {
            phone_number: "0812345678".to_string(),
            address: String::new(),
        };
        assert!(draft.validate().is_ok());

        let patched = draft.apply(SupplierPatch {
            phone_number: Some("1".repeat(21)),
            address: None,
        });
        assert!(patched.validate().is_err());
    }

    #[test]
    fn test_name_edit_keeps_locked_stock() {
        // Row as an intake left it: exhausted and deactivated
        let locked = ProductDraft {
            stock: 0,
            active_status: false,
            ..product("Widget", "10.00", 0)
        };

        let edited = locked.apply(ProductPatch {
            name: Some("Widget v2".to_string()),
            unit_price: Some(dec("12.50")),
            ..Default::default()
        });

        assert_eq!(edited.stock, 0);
        assert!(!edited.active_status);
        assert_eq!(edited.name, "Widget v2");
        assert!(edited.validate().is_ok());
    }

    #[test]
    fn test_product_name_rules() {
        assert!(validate_product_name("Arabica beans").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"x".repeat(PRODUCT_NAME_MAX_LEN)).is_ok());
        assert!(validate_product_name(&"x".repeat(PRODUCT_NAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_product_price_below_minimum() {
        let errors = product("Widget", "0.00", 5).validate().unwrap_err();
        assert_eq!(first_field_error(&errors).unwrap().field, "unit_price");

        assert!(product("Widget", "0.01", 5).validate().is_ok());
    }

    #[test]
    fn test_negative_stock_left_to_storage() {
        // Application validation accepts it; the products_stock_check constraint does not
        assert!(product("Widget", "1.00", -1).validate().is_ok());
        assert_eq!(constraint_field("products_stock_check"), Some("stock"));
    }

    #[test]
    fn test_new_product_defaults_active() {
        let input: NewProduct =
            serde_json::from_str(r#"{"name": "Widget", "unit_price": "2.50", "stock": 10}"#)
                .unwrap();
        let draft = ProductDraft::from(input);

        assert!(draft.active_status);
        assert_eq!(draft.unit_price, dec("2.50"));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_new_product_without_name_is_invalid() {
        let input: NewProduct =
            serde_json::from_str(r#"{"unit_price": "2.50", "stock": 10}"#).unwrap();

        let errors = ProductDraft::from(input).validate().unwrap_err();
        assert_eq!(first_field_error(&errors).unwrap().field, "name");
    }

    #[test]
    fn test_inventory_price_non_negative() {
        let negative = InventoryDraft {
            selling_unit_price: dec("-0.01"),
            stock: 1,
        };
        assert!(negative.validate().is_err());

        let zero = InventoryDraft {
            selling_unit_price: Decimal::ZERO,
            stock: 1,
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_registration_rules() {
        let registration = SupplierRegistration {
            username: "acme supplies".to_string(),
            password: "short".to_string(),
            phone_number: "0812345678".to_string(),
            address: String::new(),
        };

        let errors = registration.validate().unwrap_err();
        let fields: Vec<_> = errors.field_errors().keys().copied().collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"password"));
        assert!(!fields.contains(&"phone_number"));
    }

    #[test]
    fn test_duplicate_phone_maps_to_field() {
        // Second supplier registering an existing phone number
        assert_eq!(
            constraint_field("suppliers_phone_number_key"),
            Some("phone_number")
        );
        assert_eq!(constraint_field("users_username_key"), Some("username"));
    }

    #[test]
    fn test_inventory_constraints_map_to_fields() {
        assert_eq!(constraint_field("inventory_product_id_key"), Some("product"));
        assert_eq!(constraint_field("inventory_stock_check"), Some("stock"));
        assert_eq!(
            constraint_field("inventory_selling_unit_price_check"),
            Some("selling_unit_price")
        );
        assert_eq!(constraint_field("some_other_constraint"), None);
    }
}
