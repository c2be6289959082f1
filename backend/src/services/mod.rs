//! Business logic services for the inventory management platform

pub mod auth;
pub mod inventory;
pub mod product;
pub mod reporting;
pub mod supplier;

pub use auth::AuthService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use supplier::SupplierService;
