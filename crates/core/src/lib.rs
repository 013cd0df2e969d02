//! Fleet domain logic with zero internal dependencies.
//!
//! Everything here is pure: status enums, the trip transition rules, the
//! maintenance due-ness evaluator and listing helpers. Callers fetch rows
//! from the store and pass them in.

#[macro_use]
mod text_enum;

pub mod assets;
pub mod error;
pub mod maintenance;
pub mod pagination;
pub mod trips;
pub mod types;
