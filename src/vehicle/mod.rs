pub mod engine;
pub mod propulsion;
pub mod rocket_body;

pub use engine::Engine;
pub use propulsion::{PropulsionSystem, DEFAULT_MAX_GIMBAL_DEG};
pub use rocket_body::RocketBody;
