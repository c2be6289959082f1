//! Stock intake planning
//!
//! Pure decision logic for absorbing supplier stock into sellable inventory.
//! The backend runs `decide_intake` inside one database transaction against
//! the locked rows; nothing here touches storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed markup applied to a new inventory row's default selling price (1.30)
pub fn markup_rate() -> Decimal {
    Decimal::new(130, 2)
}

/// Default selling price for a product's first inventory row
///
/// The unit price is truncated to whole currency units before the markup is
/// applied, so 19.99 prices as 19 * 1.30 = 24.70. Existing inventory prices
/// were computed this way.
pub fn default_selling_price(unit_price: Decimal) -> Decimal {
    (unit_price.floor() * markup_rate()).round_dp(2)
}

/// Raw quantity as it arrives in a request body
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Count(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Why an intake was refused. None of these mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum IntakeRejection {
    #[error("Product not found")]
    NotFound,

    #[error("Product is unavailable")]
    Unavailable,

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i32 },

    #[error("Stock missing")]
    QuantityMissing,

    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },
}

impl IntakeRejection {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            IntakeRejection::NotFound => "not_found",
            IntakeRejection::Unavailable => "unavailable",
            IntakeRejection::InsufficientStock { .. } => "insufficient_stock",
            IntakeRejection::QuantityMissing => "quantity_missing",
            IntakeRejection::InvalidQuantity { .. } => "invalid_quantity",
        }
    }

    fn invalid(reason: &str) -> Self {
        IntakeRejection::InvalidQuantity {
            reason: reason.to_string(),
        }
    }
}

/// Parse the requested quantity into an integer
///
/// Absent, null or blank input is `QuantityMissing`; anything that is not an
/// integer is `InvalidQuantity`. The sign is not checked here: an inactive
/// product must still report `Unavailable` for a zero or negative request.
pub fn parse_quantity(raw: Option<&QuantityInput>) -> Result<i64, IntakeRejection> {
    match raw {
        None | Some(QuantityInput::Other(serde_json::Value::Null)) => {
            Err(IntakeRejection::QuantityMissing)
        }
        Some(QuantityInput::Count(n)) => Ok(*n),
        Some(QuantityInput::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(IntakeRejection::QuantityMissing);
            }
            trimmed
                .parse::<i64>()
                .map_err(|_| IntakeRejection::invalid("quantity must be an integer"))
        }
        Some(QuantityInput::Other(_)) => Err(IntakeRejection::invalid("quantity must be an integer")),
    }
}

/// The part of a product the engine decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSnapshot {
    pub stock: i32,
    pub active_status: bool,
    pub unit_price: Decimal,
}

/// Accepted intake: the product's state after the decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakePlan {
    pub quantity: i32,
    pub remaining_stock: i32,
    pub active_status: bool,
}

impl IntakePlan {
    /// Whether this intake exhausts the product and deactivates it
    pub fn deactivates(&self) -> bool {
        !self.active_status
    }
}

/// Check an intake against the product's current state
///
/// Checks run in a fixed order and the first failure wins: inactive products
/// are `Unavailable` regardless of quantity, then the quantity must be
/// positive, then it must not exceed the stock on hand.
pub fn plan_intake(snapshot: StockSnapshot, quantity: i64) -> Result<IntakePlan, IntakeRejection> {
    if !snapshot.active_status {
        return Err(IntakeRejection::Unavailable);
    }
    if quantity <= 0 {
        return Err(IntakeRejection::invalid("quantity must be positive"));
    }
    let quantity = match i32::try_from(quantity) {
        Ok(q) if q <= snapshot.stock => q,
        _ => {
            return Err(IntakeRejection::InsufficientStock {
                requested: quantity,
                available: snapshot.stock,
            })
        }
    };

    let remaining_stock = snapshot.stock - quantity;
    Ok(IntakePlan {
        quantity,
        remaining_stock,
        active_status: remaining_stock > 0,
    })
}

/// An existing inventory row, as far as reconciliation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryLevel {
    pub id: Uuid,
    pub stock: i32,
}

/// How the product's inventory row changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryChange {
    Create {
        stock: i32,
        selling_unit_price: Decimal,
    },
    Increment {
        inventory_id: Uuid,
        stock: i32,
    },
}

/// Inventory stock would not fit the stock column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("inventory stock overflow")]
pub struct StockOverflow;

/// Decide whether the intake creates the product's inventory row or grows it
pub fn reconcile_inventory(
    existing: Option<InventoryLevel>,
    unit_price: Decimal,
    quantity: i32,
) -> Result<InventoryChange, StockOverflow> {
    match existing {
        Some(level) => Ok(InventoryChange::Increment {
            inventory_id: level.id,
            stock: level.stock.checked_add(quantity).ok_or(StockOverflow)?,
        }),
        None => Ok(InventoryChange::Create {
            stock: quantity,
            selling_unit_price: default_selling_price(unit_price),
        }),
    }
}

/// Everything an accepted intake writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeDecision {
    pub plan: IntakePlan,
    pub change: InventoryChange,
}

/// Decide an intake from the product lookup, the raw quantity and the
/// product's inventory row
///
/// Order: unknown product, then missing or non-integer quantity, then the
/// `plan_intake` checks, then reconciliation. A rejection means nothing may
/// be written.
pub fn decide_intake(
    product: Option<StockSnapshot>,
    raw_quantity: Option<&QuantityInput>,
    inventory: Option<InventoryLevel>,
) -> Result<IntakeDecision, IntakeRejection> {
    let snapshot = product.ok_or(IntakeRejection::NotFound)?;
    let quantity = parse_quantity(raw_quantity)?;
    let plan = plan_intake(snapshot, quantity)?;
    let change = reconcile_inventory(inventory, snapshot.unit_price, plan.quantity)
        .map_err(|_| IntakeRejection::invalid("inventory stock would overflow"))?;

    Ok(IntakeDecision { plan, change })
}
