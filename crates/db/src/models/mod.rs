//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A list query with filters, sort order and pagination

pub mod driver;
pub mod maintenance;
pub mod tire;
pub mod trailer;
pub mod trip;
pub mod truck;
