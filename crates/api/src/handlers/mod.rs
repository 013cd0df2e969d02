pub mod driver;
pub mod maintenance;
pub mod tire;
pub mod trailer;
pub mod trip;
pub mod truck;
