pub mod kepler;

pub use kepler::{propagate, OrbitSummary};
