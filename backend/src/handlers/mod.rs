//! HTTP handlers

pub mod auth;
pub mod health;
pub mod inventory;
pub mod product;
pub mod reporting;
pub mod supplier;

pub use auth::*;
pub use health::*;
pub use inventory::*;
pub use product::*;
pub use reporting::*;
pub use supplier::*;
