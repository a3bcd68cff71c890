use crate::dynamics::frame::rotate;
use crate::dynamics::state::{attitude, compose, Attitude, Gen5, GimbalCommand};
use crate::physics::propulsion::{nominal_thrust, ThrustModel, ThrustOutput};
use crate::vehicle::{Rocket, TvcConfig};
use super::pid::Pid;

// ---------------------------------------------------------------------------
// TVC Controller: hold the launch attitude by deflecting the thrust vector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TvcController {
    pub pitch_pid: Pid,
    pub yaw_pid: Pid,
    max_deflection: f64, // rad
    target: Attitude,
}

impl TvcController {
    pub fn new(cfg: &TvcConfig) -> Self {
        Self {
            pitch_pid: Pid::new(cfg.kp, cfg.ki, cfg.kd),
            yaw_pid: Pid::new(cfg.kp, cfg.ki, cfg.kd),
            max_deflection: cfg.max_deflection_deg.to_radians(),
            target: Attitude::zeros(),
        }
    }

    pub fn target(&self) -> Attitude {
        self.target
    }

    pub fn max_deflection(&self) -> f64 {
        self.max_deflection
    }

    /// Nozzle deflection that steers `current` toward the target attitude,
    /// clamped per axis to the deflection limit.
    pub fn deflection(&mut self, current: &Attitude, dt: f64) -> GimbalCommand {
        let error = self.target - current;
        let limit = self.max_deflection;
        GimbalCommand {
            pitch: self.pitch_pid.update(error.x, dt).clamp(-limit, limit),
            yaw: self.yaw_pid.update(error.y, dt).clamp(-limit, limit),
        }
    }
}

impl ThrustModel for TvcController {
    /// Capture the launch attitude as the hold target and clear PID memory.
    fn reset(&mut self, launch: &Attitude) {
        self.target = *launch;
        self.pitch_pid.reset();
        self.yaw_pid.reset();
    }

    fn thrust(&mut self, time: f64, pos: &Gen5, rocket: &Rocket, dt: f64) -> ThrustOutput {
        if !rocket.is_burning(time) {
            return ThrustOutput::default();
        }
        let att = attitude(pos);
        let gimbal = self.deflection(&att, dt);
        let local = rotate(&gimbal.as_attitude(), &nominal_thrust(rocket), false);
        let global = rotate(&att, &local, false);
        let torque = Attitude::new(-local.y * rocket.cm_height, local.x * rocket.cm_height);
        ThrustOutput {
            force: compose(&global, &torque),
            gimbal,
        }
    }

    fn name(&self) -> &str {
        "TvcController"
    }
}
