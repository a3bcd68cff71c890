pub mod aerodynamics;
pub mod atmosphere;
pub mod gravity;
pub mod propulsion;

pub use propulsion::{ConstantThrust, ThrustModel, ThrustOutput};
