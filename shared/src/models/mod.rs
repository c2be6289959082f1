//! Domain models for the inventory management platform

mod account;
mod inventory;
mod product;
mod supplier;

pub use account::*;
pub use inventory::*;
pub use product::*;
pub use supplier::*;

/// Map a storage constraint name to the field it guards
///
/// Constraint names are fixed by the migrations; unknown names map to `None`.
pub fn constraint_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "users_username_key" => Some("username"),
        "suppliers_user_id_key" => Some("user"),
        "suppliers_phone_number_key" => Some("phone_number"),
        "products_name_check" => Some("name"),
        "products_unit_price_check" => Some("unit_price"),
        "products_stock_check" | "inventory_stock_check" => Some("stock"),
        "products_supplier_id_fkey" => Some("supplier"),
        "inventory_product_id_key" | "inventory_product_id_fkey" => Some("product"),
        "inventory_selling_unit_price_check" => Some("selling_unit_price"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_field_known() {
        assert_eq!(constraint_field("suppliers_phone_number_key"), Some("phone_number"));
        assert_eq!(constraint_field("products_stock_check"), Some("stock"));
        assert_eq!(constraint_field("inventory_stock_check"), Some("stock"));
        assert_eq!(constraint_field("inventory_product_id_key"), Some("product"));
    }

    #[test]
    fn test_constraint_field_unknown() {
        assert_eq!(constraint_field("something_else"), None);
    }
}
