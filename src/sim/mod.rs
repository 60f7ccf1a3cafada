pub mod controller;
pub mod event;
pub mod integrator;
pub mod runner;
pub mod telemetry;

pub use controller::{FuelAccounting, Simulation};
pub use event::{EventKind, SimEvent};
pub use integrator::rk4_step;
pub use runner::{run, FlightRecord, Outcome, RunConfig};
pub use telemetry::Telemetry;
