//! Validation utilities for the inventory management platform
//!
//! Field rules are plain functions returning `Result<(), &'static str>`. The
//! `*_rule` adapters plug the same checks into `validator` derives on the
//! draft models, so every persist path runs identical checks.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/// Maximum supplier phone number length, in characters
pub const PHONE_NUMBER_MAX_LEN: usize = 20;

/// Maximum product name length, in characters
pub const PRODUCT_NAME_MAX_LEN: usize = 255;

/// Maximum account username length, in characters
pub const USERNAME_MAX_LEN: usize = 150;

/// Minimum account password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Smallest accepted product unit price (0.01)
pub fn min_unit_price() -> Decimal {
    Decimal::new(1, 2)
}

// ============================================================================
// Supplier Validations
// ============================================================================

/// Validate supplier phone number (required, at most 20 characters)
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    if phone.trim().is_empty() {
        return Err("Phone number is required");
    }
    if phone.chars().count() > PHONE_NUMBER_MAX_LEN {
        return Err("Phone number must be at most 20 characters");
    }
    Ok(())
}

// ============================================================================
// Product Validations
// ============================================================================

/// Validate product name (required, non-blank, at most 255 characters)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Product name is required");
    }
    if name.chars().count() > PRODUCT_NAME_MAX_LEN {
        return Err("Product name must be at most 255 characters");
    }
    Ok(())
}

/// Validate product unit price (at least 0.01)
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < min_unit_price() {
        return Err("Unit price must be at least 0.01");
    }
    Ok(())
}

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate inventory selling price (non-negative)
pub fn validate_selling_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Selling unit price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate account username
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required");
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err("Username must be at most 150 characters");
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Username cannot contain whitespace");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

// ============================================================================
// validator adapters
// ============================================================================

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn phone_number_rule(phone: &str) -> Result<(), ValidationError> {
    validate_phone_number(phone).map_err(|m| rule_error("phone_number", m))
}

pub(crate) fn product_name_rule(name: &str) -> Result<(), ValidationError> {
    validate_product_name(name).map_err(|m| rule_error("name", m))
}

pub(crate) fn unit_price_rule(price: &Decimal) -> Result<(), ValidationError> {
    validate_unit_price(*price).map_err(|m| rule_error("min_unit_price", m))
}

pub(crate) fn selling_unit_price_rule(price: &Decimal) -> Result<(), ValidationError> {
    validate_selling_unit_price(*price).map_err(|m| rule_error("selling_unit_price", m))
}

pub(crate) fn username_rule(username: &str) -> Result<(), ValidationError> {
    validate_username(username).map_err(|m| rule_error("username", m))
}

pub(crate) fn password_rule(password: &str) -> Result<(), ValidationError> {
    validate_password(password).map_err(|m| rule_error("password", m))
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Reduce `ValidationErrors` to the first failing field, in field-name order
pub fn first_field_error(errors: &ValidationErrors) -> Option<FieldError> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields.into_iter().find_map(|field| {
        field_errors.get(field).and_then(|errs| errs.first()).map(|err| FieldError {
            field: field.to_string(),
            message: err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_phone_number_valid() {
        assert!(validate_phone_number("123-456-7890").is_ok());
        assert!(validate_phone_number("+1 (555) 000-0000").is_ok());
        assert!(validate_phone_number("12345678901234567890").is_ok());
    }

    #[test]
    fn test_validate_phone_number_invalid() {
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("   ").is_err());
        assert!(validate_phone_number("12345678901234567890123").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t").is_err());
        assert!(validate_product_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(dec("0.01")).is_ok());
        assert!(validate_unit_price(dec("12.34")).is_ok());
        assert!(validate_unit_price(dec("0.00")).is_err());
        assert!(validate_unit_price(dec("0.009")).is_err());
        assert!(validate_unit_price(dec("-5000000.123")).is_err());
    }

    #[test]
    fn test_validate_selling_unit_price() {
        assert!(validate_selling_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_selling_unit_price(dec("13.00")).is_ok());
        assert!(validate_selling_unit_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("supplier_one").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }
}
