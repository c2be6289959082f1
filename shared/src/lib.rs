//! Shared types and models for the inventory management platform
//!
//! Entity drafts and their validation rules, the pure stock intake engine,
//! access roles and pagination. Everything here is free of I/O so the backend
//! and its tests share one definition of each invariant.

pub mod intake;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
