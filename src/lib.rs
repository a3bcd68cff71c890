pub mod dynamics;
pub mod physics;
pub mod vehicle;
mod gnc_mod;
pub mod sim;
pub mod io;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod types {
    pub use crate::dynamics::state::{AngleOfAttack, Attitude, Gen5, GimbalCommand, G0};
    pub use crate::vehicle::{Rocket, RocketConfig, ScenarioConfig, TvcConfig};
}

pub use sim::{FlightLog, Simulation};
