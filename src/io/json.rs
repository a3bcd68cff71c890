use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::{attitude, translational};
use crate::sim::{detect_events, EventKind, Simulation};

/// Summary statistics computed from a finished simulation.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub model: String,
    pub apogee_m: f64,
    pub apogee_time_s: f64,
    pub max_speed_mps: f64,
    pub max_accel_mps2: f64,
    pub rail_exit_speed_mps: Option<f64>,
    pub burnout_altitude_m: Option<f64>,
    pub touchdown_time_s: Option<f64>,
    pub touchdown_east_m: f64,
    pub touchdown_north_m: f64,
    /// Largest deviation of the body attitude from the launch attitude
    /// while the motor was burning, rad.
    pub max_attitude_error_rad: f64,
    pub max_gimbal_rad: f64,
}

impl FlightSummary {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let log = sim.log();
        let rocket = sim.rocket();
        let launch = sim.launch_attitude();

        let (apogee_idx, apogee_m) = log
            .position()
            .iter()
            .map(|p| p[2])
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, z)| if z > best.1 { (i, z) } else { best });

        let max_speed_mps = log
            .velocity()
            .iter()
            .map(|v| translational(v).norm())
            .fold(0.0_f64, f64::max);

        let max_accel_mps2 = log
            .acceleration()
            .iter()
            .map(|a| translational(a).norm())
            .fold(0.0_f64, f64::max);

        let max_attitude_error_rad = log
            .position()
            .iter()
            .zip(log.time())
            .filter(|(_, t)| rocket.is_burning(**t))
            .map(|(p, _)| (attitude(p) - launch).amax())
            .fold(0.0_f64, f64::max);

        let max_gimbal_rad = log
            .gimbal()
            .iter()
            .map(|g| g.pitch.abs().max(g.yaw.abs()))
            .fold(0.0_f64, f64::max);

        let events = detect_events(log, rocket);
        let find = |kind: EventKind| events.iter().find(|e| e.kind == kind);

        let last = log.last();
        FlightSummary {
            model: sim.thrust_model_name().to_string(),
            apogee_m,
            apogee_time_s: log.time()[apogee_idx],
            max_speed_mps,
            max_accel_mps2,
            rail_exit_speed_mps: find(EventKind::RailExit).map(|e| translational(&e.state.vel).norm()),
            burnout_altitude_m: find(EventKind::Burnout).map(|e| e.state.pos[2]),
            touchdown_time_s: find(EventKind::Touchdown).map(|e| e.time),
            touchdown_east_m: last.pos[0],
            touchdown_north_m: last.pos[1],
            max_attitude_error_rad,
            max_gimbal_rad,
        }
    }
}

/// Write flight summaries as pretty JSON.
pub fn write_summary<W: Write>(writer: &mut W, summaries: &[FlightSummary]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summaries)?;
    writeln!(writer)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summaries: &[FlightSummary]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summaries)
}
