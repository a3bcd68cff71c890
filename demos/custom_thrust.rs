use launchsim::dynamics::{rotate, Attitude, Gen5, GimbalCommand};
use launchsim::dynamics::state::{attitude, compose};
use launchsim::physics::propulsion::nominal_thrust;
use launchsim::physics::{ThrustModel, ThrustOutput};
use launchsim::sim::Simulation;
use launchsim::types::Rocket;
use launchsim::vehicle::presets;

/// Bang-bang steering: kick the nozzle a fixed angle for a short window
/// after rail exit, otherwise fire straight along the body axis.
struct BangBang {
    kick_start: f64,
    kick_end: f64,
    kick: f64,
}

impl ThrustModel for BangBang {
    fn thrust(&mut self, time: f64, pos: &Gen5, rocket: &Rocket, _dt: f64) -> ThrustOutput {
        if !rocket.is_burning(time) {
            return ThrustOutput::default();
        }
        let pitch = if time > self.kick_start && time < self.kick_end {
            -self.kick
        } else {
            0.0
        };
        let gimbal = GimbalCommand { pitch, yaw: 0.0 };
        let local = rotate(&gimbal.as_attitude(), &nominal_thrust(rocket), false);
        let global = rotate(&attitude(pos), &local, false);
        let torque = Attitude::new(-local.y * rocket.cm_height, local.x * rocket.cm_height);
        ThrustOutput { force: compose(&global, &torque), gimbal }
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

fn main() -> anyhow::Result<()> {
    let model = BangBang { kick_start: 1.0, kick_end: 1.5, kick: 0.02 };
    let mut sim = Simulation::with_thrust_model(&presets::mk1(), Box::new(model))?;

    println!("Simulating with {} thrust model...", sim.thrust_model_name());
    sim.run();

    let log = sim.log();
    let last = log.last();
    let apogee = log.position().iter().map(|p| p[2]).fold(0.0_f64, f64::max);

    println!("Apogee: {:.0} m ({:.2} km)", apogee, apogee / 1000.0);
    println!("Landing point: {:.0} m E, {:.0} m N", last.pos[0], last.pos[1]);
    println!("Samples: {}", log.len());
    Ok(())
}
