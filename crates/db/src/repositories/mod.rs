//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod driver_repo;
pub mod maintenance_record_repo;
pub mod maintenance_rule_repo;
pub mod tire_repo;
pub mod trailer_repo;
pub mod trip_repo;
pub mod truck_repo;

pub use driver_repo::DriverRepo;
pub use maintenance_record_repo::MaintenanceRecordRepo;
pub use maintenance_rule_repo::MaintenanceRuleRepo;
pub use tire_repo::TireRepo;
pub use trailer_repo::TrailerRepo;
pub use trip_repo::TripRepo;
pub use truck_repo::TruckRepo;
