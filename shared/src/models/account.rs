//! Account and access role models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Caller classification used by the access gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRole {
    Admin,
    Supplier,
    Anonymous,
}

impl AccessRole {
    /// Classify an account. Administrators win over a supplier profile.
    pub fn classify(is_admin: bool, has_supplier_profile: bool) -> Self {
        if is_admin {
            AccessRole::Admin
        } else if has_supplier_profile {
            AccessRole::Supplier
        } else {
            AccessRole::Anonymous
        }
    }

    /// Whether a caller with this role may enter an operation requiring `required`
    pub fn permits(self, required: AccessRole) -> bool {
        match required {
            AccessRole::Anonymous => true,
            other => self == other,
        }
    }

    /// Gate decision for a caller. Supplier self-service admits anyone with a
    /// supplier profile, including an administrator who also supplies.
    pub fn admits(self, required: AccessRole, has_supplier_profile: bool) -> bool {
        self.permits(required) || (required == AccessRole::Supplier && has_supplier_profile)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRole::Admin => "admin",
            AccessRole::Supplier => "supplier",
            AccessRole::Anonymous => "anonymous",
        }
    }
}

impl std::fmt::Display for AccessRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier onboarding: a new account together with its supplier profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SupplierRegistration {
    #[validate(custom = "crate::validation::username_rule")]
    pub username: String,
    #[validate(custom = "crate::validation::password_rule")]
    pub password: String,
    #[validate(custom = "crate::validation::phone_number_rule")]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(AccessRole::classify(true, false), AccessRole::Admin);
        assert_eq!(AccessRole::classify(true, true), AccessRole::Admin);
        assert_eq!(AccessRole::classify(false, true), AccessRole::Supplier);
        assert_eq!(AccessRole::classify(false, false), AccessRole::Anonymous);
    }

    #[test]
    fn test_permits() {
        assert!(AccessRole::Admin.permits(AccessRole::Admin));
        assert!(!AccessRole::Admin.permits(AccessRole::Supplier));
        assert!(AccessRole::Supplier.permits(AccessRole::Supplier));
        assert!(!AccessRole::Supplier.permits(AccessRole::Admin));
        assert!(!AccessRole::Anonymous.permits(AccessRole::Admin));
        assert!(AccessRole::Anonymous.permits(AccessRole::Anonymous));
    }

    #[test]
    fn test_admits_supplier_profile_holders() {
        assert!(AccessRole::Admin.admits(AccessRole::Supplier, true));
        assert!(!AccessRole::Admin.admits(AccessRole::Supplier, false));
        assert!(AccessRole::Admin.admits(AccessRole::Admin, true));
        assert!(!AccessRole::Supplier.admits(AccessRole::Admin, true));
    }

    #[test]
    fn test_registration_validation() {
        let valid = SupplierRegistration {
            username: "acme".to_string(),
            password: "supplierpass".to_string(),
            phone_number: "123-456-7890".to_string(),
            address: "123 Main St".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_phone = SupplierRegistration {
            phone_number: "12345678901234567890123".to_string(),
            ..valid.clone()
        };
        let errors = bad_phone.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));

        let bad_password = SupplierRegistration {
            password: "short".to_string(),
            ..valid
        };
        let errors = bad_password.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
