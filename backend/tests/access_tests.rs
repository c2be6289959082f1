//! Access gate tests
//!
//! Tests for caller classification and role checks:
//! - Administrators are classified as admin even with a supplier profile
//! - A gated operation admits exactly the role it requires
//! - Public operations admit everyone
//! - Supplier self-service admits anyone holding a supplier profile

use proptest::prelude::*;
use shared::models::AccessRole;

fn role_strategy() -> impl Strategy<Value = AccessRole> {
    prop_oneof![
        Just(AccessRole::Admin),
        Just(AccessRole::Supplier),
        Just(AccessRole::Anonymous),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Classification depends on the admin flag first, the supplier profile second
    #[test]
    fn test_classification(is_admin in any::<bool>(), has_profile in any::<bool>()) {
        let role = AccessRole::classify(is_admin, has_profile);

        prop_assert_eq!(role == AccessRole::Admin, is_admin);
        prop_assert_eq!(role == AccessRole::Supplier, !is_admin && has_profile);
        prop_assert_eq!(role == AccessRole::Anonymous, !is_admin && !has_profile);
    }

    /// Gated roles admit only themselves; public operations admit every caller
    #[test]
    fn test_permits(caller in role_strategy(), required in role_strategy()) {
        let admitted = caller.permits(required);

        if required == AccessRole::Anonymous {
            prop_assert!(admitted);
        } else {
            prop_assert_eq!(admitted, caller == required);
        }
    }

    /// The gate adds exactly one admission to `permits`: supplier routes for
    /// callers with a supplier profile
    #[test]
    fn test_admits(
        caller in role_strategy(),
        required in role_strategy(),
        has_profile in any::<bool>(),
    ) {
        let expected = caller.permits(required)
            || (required == AccessRole::Supplier && has_profile);
        prop_assert_eq!(caller.admits(required, has_profile), expected);
    }

    /// Role names round-trip through their wire form
    #[test]
    fn test_role_wire_name(role in role_strategy()) {
        let json = serde_json::to_string(&role).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", role));

        let back: AccessRole = serde_json::from_str(&format!("\"{}\"", role.as_str())).unwrap();
        prop_assert_eq!(back, role);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_supplier_cannot_reach_admin_operations() {
        assert!(!AccessRole::Supplier.permits(AccessRole::Admin));
        assert!(!AccessRole::Anonymous.permits(AccessRole::Admin));
    }

    #[test]
    fn test_admin_without_profile_cannot_use_supplier_self_service() {
        assert!(!AccessRole::Admin.admits(AccessRole::Supplier, false));
    }

    #[test]
    fn test_admin_with_profile_uses_supplier_self_service() {
        let role = AccessRole::classify(true, true);
        assert_eq!(role, AccessRole::Admin);
        assert!(role.admits(AccessRole::Supplier, true));
        assert!(role.admits(AccessRole::Admin, true));
    }

    #[test]
    fn test_admin_with_supplier_profile() {
        assert_eq!(AccessRole::classify(true, true), AccessRole::Admin);
    }
}
