use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::dynamics::state::{translational, Gen5};

use super::config::RocketConfig;

// ---------------------------------------------------------------------------
// Rocket: validated configuration in SI units
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    pub dry_mass: f64,          // kg
    pub wet_mass: f64,          // kg
    pub thrust: f64,            // N
    pub burn_time: f64,         // s
    pub cd: f64,
    pub cl: f64,
    pub critical_aoa: f64,      // rad
    pub length: f64,            // m
    pub radius: f64,            // m
    pub cm_height: f64,         // m, from the nozzle end
    pub cp_height: f64,         // m, from the nozzle end
    pub rail_length: f64,       // m
    pub wind: Vector3<f64>,     // m/s, ENU air velocity
}

impl Rocket {
    pub fn from_config(cfg: &RocketConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        let wind_dir = cfg.wind_dir_deg.to_radians();
        Ok(Self {
            dry_mass: cfg.dry_mass_kg,
            wet_mass: cfg.wet_mass_kg,
            thrust: cfg.thrust_n,
            burn_time: cfg.burn_s,
            cd: cfg.drag_coeff,
            cl: cfg.lift_coeff,
            critical_aoa: cfg.critical_aoa_deg.to_radians(),
            length: cfg.length_mm / 1000.0,
            radius: cfg.radius_mm / 1000.0,
            cm_height: cfg.cm_height_mm / 1000.0,
            cp_height: cfg.cp_height_mm / 1000.0,
            rail_length: cfg.rail_length_m,
            wind: -cfg.wind_speed_mps * Vector3::new(wind_dir.sin(), wind_dir.cos(), 0.0),
        })
    }

    pub fn propellant_mass(&self) -> f64 {
        self.wet_mass - self.dry_mass
    }

    pub fn is_burning(&self, time: f64) -> bool {
        time < self.burn_time
    }

    /// Mass at `time`: linear propellant depletion over the burn, then dry.
    pub fn mass_at(&self, time: f64) -> f64 {
        if self.is_burning(time) {
            self.wet_mass - self.propellant_mass() * time / self.burn_time
        } else {
            self.dry_mass
        }
    }

    /// Frontal (drag reference) area, m^2.
    pub fn front_area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Side (lift reference) area, m^2.
    pub fn side_area(&self) -> f64 {
        2.0 * self.length * self.radius
    }

    /// Pitch/yaw moment of inertia of a solid cylinder, kg·m^2.
    pub fn transverse_inertia(&self, mass: f64) -> f64 {
        mass * (3.0 * self.radius * self.radius + self.length * self.length) / 12.0
    }

    /// Air-relative velocity of the vehicle.
    pub fn relative_velocity(&self, vel: &Gen5) -> Vector3<f64> {
        translational(vel) - self.wind
    }

    /// Thrust-to-weight ratio at ignition.
    pub fn twr(&self) -> f64 {
        self.thrust / (self.wet_mass * crate::dynamics::state::G0)
    }

    /// Total impulse delivered over the burn, N·s.
    pub fn total_impulse(&self) -> f64 {
        self.thrust * self.burn_time
    }
}
