use nalgebra::Vector3;
use tracing::{debug, info, trace, warn};

use crate::dynamics::frame::launch_attitude;
use crate::dynamics::state::{
    attitude, compose, suppress_drift, translational, AngleOfAttack, Attitude, Gen5,
};
use crate::gnc::TvcController;
use crate::physics::aerodynamics::{drag, lift};
use crate::physics::atmosphere::{self, SEA_LEVEL_DENSITY};
use crate::physics::gravity::{on_rail, weight};
use crate::physics::propulsion::{ConstantThrust, ThrustModel};
use crate::vehicle::{Rocket, RocketConfig, TvcConfig};
use super::integrator::semi_implicit_euler;
use super::series::FlightLog;

// ---------------------------------------------------------------------------
// Flight dynamics engine: one instance, one run
// ---------------------------------------------------------------------------

pub struct Simulation {
    rocket: Rocket,
    dt: f64,
    launch: Attitude,
    thrust_model: Box<dyn ThrustModel>,
    log: FlightLog,
    finished: bool,
}

impl Simulation {
    /// Fixed-nozzle rocket.
    pub fn new(cfg: &RocketConfig) -> anyhow::Result<Self> {
        Self::with_thrust_model(cfg, Box::new(ConstantThrust))
    }

    /// Rocket whose thrust vector is steered to hold the launch attitude.
    pub fn with_tvc(cfg: &RocketConfig, tvc: &TvcConfig) -> anyhow::Result<Self> {
        tvc.validate()?;
        Self::with_thrust_model(cfg, Box::new(TvcController::new(tvc)))
    }

    /// Rocket driven by any thrust strategy. The model is reset with the
    /// launch attitude before this returns.
    pub fn with_thrust_model(
        cfg: &RocketConfig,
        mut thrust_model: Box<dyn ThrustModel>,
    ) -> anyhow::Result<Self> {
        let rocket = Rocket::from_config(cfg)?;
        let launch = launch_attitude(cfg.launch_angle.elevation_deg, cfg.launch_angle.azimuth_deg);
        thrust_model.reset(&launch);

        let samples = cfg.samples();
        let log = FlightLog::new(
            samples,
            cfg.time_horizon_s,
            compose(&Vector3::zeros(), &launch),
            rocket.wet_mass,
            SEA_LEVEL_DENSITY,
        );
        debug!(
            model = thrust_model.name(),
            samples,
            dt = cfg.step_s,
            pitch = launch.x,
            yaw = launch.y,
            "simulation initialised"
        );

        Ok(Self {
            rocket,
            dt: cfg.step_s,
            launch,
            thrust_model,
            log,
            finished: false,
        })
    }

    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    pub fn launch_attitude(&self) -> Attitude {
        self.launch
    }

    pub fn thrust_model_name(&self) -> &str {
        self.thrust_model.name()
    }

    pub fn log(&self) -> &FlightLog {
        &self.log
    }

    pub fn into_log(self) -> FlightLog {
        self.log
    }

    /// Integrate the full horizon. There is no early exit on touchdown.
    /// A second call does nothing.
    pub fn run(&mut self) {
        if self.finished {
            warn!(model = self.thrust_model.name(), "run() called twice, ignoring");
            return;
        }

        let mut was_on_rail = true;
        let mut was_burning = true;
        for i in 0..self.log.capacity() - 1 {
            let Some(now) = self.log.snapshot(i) else { break };

            let acc = self.acceleration(now.time, &now.pos, &now.vel);
            let (pos, vel) = self.step(now.time, &now.pos, &now.vel, &acc);

            let still_on_rail = on_rail(&pos, self.rocket.rail_length);
            if was_on_rail && !still_on_rail {
                trace!(t = now.time, speed = translational(&vel).norm(), "left launch rail");
            }
            was_on_rail = still_on_rail;

            let burning = self.rocket.is_burning(now.time);
            if was_burning && !burning {
                trace!(t = now.time, alt = pos[2], "burnout");
            }
            was_burning = burning;
        }
        self.finished = true;

        let apogee = self
            .log
            .position()
            .iter()
            .map(|p| p[2])
            .fold(f64::NEG_INFINITY, f64::max);
        info!(
            model = self.thrust_model.name(),
            steps = self.log.len() - 1,
            apogee_m = apogee,
            "simulation complete"
        );
    }

    /// Net generalized acceleration at the current state; records the
    /// per-force contributions for the sample being built.
    fn acceleration(&mut self, time: f64, pos: &Gen5, vel: &Gen5) -> Gen5 {
        let mass = self.log.current_mass();
        let rho = self.log.current_density();
        let alpha = self.log.current_alpha();

        let thrust = self.thrust_model.thrust(time, pos, &self.rocket, self.dt);
        let f_drag = drag(vel, rho, &self.rocket);
        let f_weight = weight(pos, mass, self.rocket.rail_length);
        let f_lift = lift(pos, vel, alpha, rho, &self.rocket);

        let linear = translational(&(thrust.force + f_drag + f_lift + f_weight)) / mass;
        let torque = attitude(&thrust.force) + attitude(&f_lift);
        let angular = suppress_drift(torque / self.rocket.transverse_inertia(mass));
        let acc = compose(&linear, &angular);

        self.log.record_forces(
            acc,
            translational(&thrust.force),
            translational(&f_drag),
            translational(&f_lift),
            thrust.gimbal,
        );
        acc
    }

    /// Semi-implicit Euler step, then refresh the auxiliary series.
    fn step(&mut self, time: f64, pos: &Gen5, vel: &Gen5, acc: &Gen5) -> (Gen5, Gen5) {
        let (pos_next, vel_next) = semi_implicit_euler(pos, vel, acc, self.dt);
        self.log.record_state(pos_next, vel_next);
        self.update(time, &pos_next, &vel_next);
        (pos_next, vel_next)
    }

    /// Append mass, air density and angle of attack for the new state and
    /// commit the sample. Mass is evaluated at the start-of-step `time`.
    fn update(&mut self, time: f64, pos: &Gen5, vel: &Gen5) {
        let mass = self.rocket.mass_at(time);
        let rho = atmosphere::density(pos[2]);
        let aoa = AngleOfAttack::from_motion(&self.rocket.relative_velocity(vel), &attitude(pos));
        self.log.record_aux(mass, rho, aoa);
        self.log.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;

    fn short(cfg: RocketConfig) -> RocketConfig {
        RocketConfig { time_horizon_s: 10.0, ..cfg }
    }

    #[test]
    fn construction_seeds_first_sample() {
        let sim = Simulation::new(&presets::mk1()).unwrap();
        let log = sim.log();
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 9001);
        assert_eq!(log.mass()[0], 18.554);
        assert_eq!(log.air_density()[0], SEA_LEVEL_DENSITY);
        assert_eq!(log.angle_of_attack()[0], AngleOfAttack::default());
        assert_eq!(log.position()[0][3], 0.0);
        assert!((log.position()[0][4] - 10.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn invalid_config_never_builds() {
        let cfg = RocketConfig { step_s: 0.0, ..presets::mk1() };
        assert!(Simulation::new(&cfg).is_err());
        let tvc = TvcConfig { max_deflection_deg: -1.0, ..presets::mk1_tvc() };
        assert!(Simulation::with_tvc(&presets::mk1(), &tvc).is_err());
    }

    #[test]
    fn run_fills_every_series() {
        let mut sim = Simulation::new(&short(presets::mk1())).unwrap();
        sim.run();
        let log = sim.log();
        assert!(log.is_complete());
        assert_eq!(log.len(), 1001);
        assert_eq!(log.mass().len(), 1001);
        assert_eq!(log.thrust_force().len(), 1001);
        assert_eq!(log.thrust_force()[0], Vector3::zeros());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut sim = Simulation::new(&short(presets::mk1())).unwrap();
        sim.run();
        let first = sim.log().clone();
        sim.run();
        assert_eq!(&first, sim.log());
    }

    #[test]
    fn acceleration_lifts_off_without_torque() {
        let mut sim = Simulation::new(&presets::mk1()).unwrap();
        let now = sim.log().snapshot(0).unwrap();
        let acc = sim.acceleration(now.time, &now.pos, &now.vel);
        assert!(acc[2] > 0.0, "TWR > 1 must lift off the rail");
        assert_eq!(acc[3], 0.0);
        assert_eq!(acc[4], 0.0);
    }

    #[test]
    fn mass_sample_uses_start_of_step_time() {
        let mut sim = Simulation::new(&presets::mk1()).unwrap();
        let now = sim.log().snapshot(0).unwrap();
        let acc = sim.acceleration(now.time, &now.pos, &now.vel);
        sim.step(now.time, &now.pos, &now.vel, &acc);
        assert_eq!(sim.log().mass()[1], 18.554);
        assert_eq!(sim.log().len(), 2);
        assert!((sim.log().thrust_force()[1].norm() - 2529.0).abs() < 1e-9);
        assert_eq!(sim.log().acceleration()[1], acc);
    }
}
