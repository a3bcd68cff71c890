use nalgebra::Vector3;

use crate::dynamics::frame::rotate;
use crate::dynamics::state::{attitude, compose, Attitude, Gen5, GimbalCommand};
use crate::vehicle::Rocket;

/// Generalized thrust force plus the deflection that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrustOutput {
    pub force: Gen5,
    pub gimbal: GimbalCommand,
}

/// Strategy for the thrust force applied at each step.
///
/// Implement this to plug a different motor or steering law into
/// [`Simulation`](crate::sim::Simulation). The engine calls `thrust` exactly
/// once per integration step, in time order.
pub trait ThrustModel: Send {
    /// Called once when the simulation is built, with the launch attitude.
    fn reset(&mut self, _launch: &Attitude) {}

    fn thrust(&mut self, time: f64, pos: &Gen5, rocket: &Rocket, dt: f64) -> ThrustOutput;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Nominal motor thrust along body +Z, rotated into the global frame.
pub fn nominal_thrust(rocket: &Rocket) -> Vector3<f64> {
    Vector3::new(0.0, 0.0, rocket.thrust)
}

/// Fixed-nozzle motor: constant thrust along the body axis during the burn.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantThrust;

impl ThrustModel for ConstantThrust {
    fn thrust(&mut self, time: f64, pos: &Gen5, rocket: &Rocket, _dt: f64) -> ThrustOutput {
        if !rocket.is_burning(time) {
            return ThrustOutput::default();
        }
        let global = rotate(&attitude(pos), &nominal_thrust(rocket), false);
        ThrustOutput {
            force: compose(&global, &Attitude::zeros()),
            gimbal: GimbalCommand::default(),
        }
    }

    fn name(&self) -> &str {
        "ConstantThrust"
    }
}
