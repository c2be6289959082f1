//! Supplier models

use serde::Deserialize;
use validator::Validate;

/// The persisted, validated shape of a supplier row
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SupplierDraft {
    #[validate(custom = "crate::validation::phone_number_rule")]
    pub phone_number: String,
    pub address: String,
}

/// Partial edit of a supplier profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierPatch {
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl SupplierDraft {
    /// Apply an edit; the result must be validated again before it is persisted
    pub fn apply(self, patch: SupplierPatch) -> Self {
        Self {
            phone_number: patch.phone_number.unwrap_or(self.phone_number),
            address: patch.address.unwrap_or(self.address),
        }
    }
}
