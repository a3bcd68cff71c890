//! User-facing configuration records.
//!
//! Lengths that describe the airframe are given in millimetres, angles in
//! degrees. [`Rocket`](super::Rocket) converts everything to SI once, at
//! construction.
//!
//! A scenario file (YAML) wraps one rocket and an optional TVC block:
//!
//! ```yaml
//! rocket:
//!   launch_angle: { elevation_deg: 80.0, azimuth_deg: 90.0 }
//!   time_horizon_s: 90.0
//!   dry_mass_kg: 9.85
//!   wet_mass_kg: 18.554
//!   # ...
//! tvc:
//!   kp: 80.0
//!   ki: 600.0
//!   kd: 30.0
//! ```

use serde::{Deserialize, Serialize};

/// Upper bound on integration steps per run; every series is allocated
/// for the full horizon up front.
pub const MAX_STEPS: f64 = 10_000_000.0;

/// Allowed distance of `horizon / step` from a whole number of steps.
const STEP_COUNT_TOLERANCE: f64 = 1e-6;

fn default_step() -> f64 {
    0.01
}

fn default_rail_length() -> f64 {
    5.0
}

fn default_max_deflection() -> f64 {
    5.0
}

/// Launch rail orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchAngle {
    pub elevation_deg: f64, // from horizontal
    pub azimuth_deg: f64,   // from North, clockwise
}

/// Physical and numerical parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketConfig {
    pub launch_angle: LaunchAngle,
    pub time_horizon_s: f64,
    #[serde(default = "default_step")]
    pub step_s: f64,
    #[serde(default)]
    pub wind_speed_mps: f64,
    #[serde(default)]
    pub wind_dir_deg: f64, // direction the wind blows from, from North
    pub dry_mass_kg: f64,
    pub wet_mass_kg: f64,
    pub length_mm: f64,
    pub drag_coeff: f64,
    pub lift_coeff: f64,
    pub critical_aoa_deg: f64,
    pub cm_height_mm: f64,
    pub cp_height_mm: f64,
    pub radius_mm: f64,
    pub thrust_n: f64,
    pub burn_s: f64,
    #[serde(default = "default_rail_length")]
    pub rail_length_m: f64,
}

impl RocketConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let fields = [
            ("launch_angle.elevation_deg", self.launch_angle.elevation_deg),
            ("launch_angle.azimuth_deg", self.launch_angle.azimuth_deg),
            ("time_horizon_s", self.time_horizon_s),
            ("step_s", self.step_s),
            ("wind_speed_mps", self.wind_speed_mps),
            ("wind_dir_deg", self.wind_dir_deg),
            ("dry_mass_kg", self.dry_mass_kg),
            ("wet_mass_kg", self.wet_mass_kg),
            ("length_mm", self.length_mm),
            ("drag_coeff", self.drag_coeff),
            ("lift_coeff", self.lift_coeff),
            ("critical_aoa_deg", self.critical_aoa_deg),
            ("cm_height_mm", self.cm_height_mm),
            ("cp_height_mm", self.cp_height_mm),
            ("radius_mm", self.radius_mm),
            ("thrust_n", self.thrust_n),
            ("burn_s", self.burn_s),
            ("rail_length_m", self.rail_length_m),
        ];
        for (name, value) in fields {
            anyhow::ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }

        anyhow::ensure!(self.time_horizon_s > 0.0, "time_horizon_s must be > 0");
        anyhow::ensure!(self.step_s > 0.0, "step_s must be > 0");
        anyhow::ensure!(
            self.time_horizon_s >= self.step_s,
            "time_horizon_s must cover at least one step"
        );
        let steps = self.time_horizon_s / self.step_s;
        anyhow::ensure!(
            steps.is_finite() && steps <= MAX_STEPS,
            "time_horizon_s / step_s = {steps} exceeds the limit of {MAX_STEPS} steps"
        );
        anyhow::ensure!(
            (steps - steps.round()).abs() <= STEP_COUNT_TOLERANCE,
            "time_horizon_s ({}) must be a whole number of steps of {} s",
            self.time_horizon_s,
            self.step_s
        );
        anyhow::ensure!(self.dry_mass_kg > 0.0, "dry_mass_kg must be > 0");
        anyhow::ensure!(
            self.wet_mass_kg > self.dry_mass_kg,
            "wet_mass_kg ({}) must exceed dry_mass_kg ({})",
            self.wet_mass_kg,
            self.dry_mass_kg
        );
        anyhow::ensure!(self.burn_s >= 0.0, "burn_s must be >= 0");
        anyhow::ensure!(self.length_mm >= 0.0, "length_mm must be >= 0");
        anyhow::ensure!(self.radius_mm >= 0.0, "radius_mm must be >= 0");
        anyhow::ensure!(
            self.length_mm > 0.0 || self.radius_mm > 0.0,
            "length_mm and radius_mm cannot both be zero"
        );
        anyhow::ensure!(self.critical_aoa_deg > 0.0, "critical_aoa_deg must be > 0");
        anyhow::ensure!(self.rail_length_m >= 0.0, "rail_length_m must be >= 0");
        Ok(())
    }

    /// Number of samples in every output series (initial state included).
    pub fn samples(&self) -> usize {
        ((self.time_horizon_s / self.step_s).round() as usize).saturating_add(1)
    }
}

impl Default for RocketConfig {
    fn default() -> Self {
        presets::mk1()
    }
}

/// PID gains and deflection limit of the thrust-vector controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TvcConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    #[serde(default = "default_max_deflection")]
    pub max_deflection_deg: f64,
}

impl TvcConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite(),
            "PID gains must be finite"
        );
        anyhow::ensure!(
            self.max_deflection_deg.is_finite() && self.max_deflection_deg >= 0.0,
            "max_deflection_deg must be >= 0"
        );
        Ok(())
    }
}

/// Top-level scenario loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub rocket: RocketConfig,
    #[serde(default)]
    pub tvc: Option<TvcConfig>,
}

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Reference single-stage rocket ("Mk1"), 10 deg off vertical toward East.
    pub fn mk1() -> RocketConfig {
        RocketConfig {
            launch_angle: LaunchAngle {
                elevation_deg: 80.0,
                azimuth_deg: 90.0,
            },
            time_horizon_s: 90.0,
            step_s: default_step(),
            wind_speed_mps: 0.0,
            wind_dir_deg: 0.0,
            dry_mass_kg: 9.85,
            wet_mass_kg: 18.554,
            length_mm: 2710.0,
            drag_coeff: 0.75,
            lift_coeff: 0.15,
            critical_aoa_deg: 20.0,
            cm_height_mm: 710.0,
            cp_height_mm: 510.0,
            radius_mm: 51.5,
            thrust_n: 2529.0,
            burn_s: 6.04,
            rail_length_m: default_rail_length(),
        }
    }

    /// Gains tuned for [`mk1`] at a 0.01 s step.
    pub fn mk1_tvc() -> TvcConfig {
        TvcConfig {
            kp: 80.0,
            ki: 600.0,
            kd: 30.0,
            max_deflection_deg: default_max_deflection(),
        }
    }

    /// Wind study around [`mk1`]: (label, speed m/s, direction deg).
    pub fn wind_cases() -> Vec<(&'static str, f64, f64)> {
        vec![
            ("calm", 0.0, 0.0),
            ("headwind 3 m/s", 3.0, 90.0),
            ("headwind 8 m/s", 8.0, 90.0),
            ("headwind 14 m/s", 14.0, 90.0),
            ("crosswind 8 m/s", 8.0, 0.0),
            ("tailwind 8 m/s", 8.0, 270.0),
        ]
    }

    /// Extreme-wind study for the TVC rocket: 17, 21 and 25 m/s from the
    /// head, cross and tail directions.
    pub fn extreme_wind_cases() -> Vec<(&'static str, f64, f64)> {
        vec![
            ("headwind 17 m/s", 17.0, 90.0),
            ("headwind 21 m/s", 21.0, 90.0),
            ("headwind 25 m/s", 25.0, 90.0),
            ("crosswind 17 m/s", 17.0, 0.0),
            ("crosswind 21 m/s", 21.0, 0.0),
            ("crosswind 25 m/s", 25.0, 0.0),
            ("tailwind 17 m/s", 17.0, 270.0),
            ("tailwind 21 m/s", 21.0, 270.0),
            ("tailwind 25 m/s", 25.0, 270.0),
        ]
    }
}
