pub mod error;
pub mod math;
pub mod physics;
pub mod dynamics;
pub mod vehicle;
pub mod sim;
pub mod orbital;
pub mod io;

pub use error::SimError;

// Flat re-exports for drivers and integration tests
pub mod prelude {
    pub use crate::dynamics::State;
    pub use crate::error::SimError;
    pub use crate::io::VehicleConfig;
    pub use crate::math::VectorExt;
    pub use crate::physics::constants::{EARTH_RADIUS, G0, MU_EARTH};
    pub use crate::sim::{run, FlightRecord, FuelAccounting, Outcome, RunConfig, Simulation};
    pub use crate::vehicle::{Engine, PropulsionSystem, RocketBody};
}
