//! Asset lifecycle services.
//!
//! - [`assignment`] attaches drivers, trailers and tires to trucks.
//! - [`trips`] moves trips through their status lifecycle and applies the
//!   resulting truck side effects.
//! - [`maintenance`] scans the registry for assets due for maintenance.
//!
//! Every service reads and writes through the [`store::FleetStore`] trait,
//! backed by PostgreSQL in [`store::PgFleetStore`]. The `test-support`
//! feature adds `store::MemoryStore`, which keeps everything in process.

pub mod assignment;
pub mod error;
pub mod lookup;
pub mod maintenance;
pub mod store;
pub mod trips;

pub use error::{FleetError, FleetResult};
pub use store::{FleetStore, PgFleetStore};

#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryStore;
