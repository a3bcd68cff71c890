use nalgebra::{Vector2, Vector3, Vector5};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2

/// Magnitudes below this are treated as floating-point noise and zeroed
/// (initial orientation, angular acceleration).
pub const DRIFT_TOLERANCE: f64 = 1e-13;

// ---------------------------------------------------------------------------
// Generalized 5-component state
// ---------------------------------------------------------------------------

/// Generalized position/velocity/acceleration/force.
/// Layout: [East, North, Up, pitch, yaw] in the global ENU frame.
pub type Gen5 = Vector5<f64>;

/// Pitch/yaw pair, rad.
pub type Attitude = Vector2<f64>;

/// Translational part [East, North, Up].
pub fn translational(v: &Gen5) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

/// Angular part [pitch, yaw].
pub fn attitude(v: &Gen5) -> Attitude {
    Attitude::new(v[3], v[4])
}

/// Assemble a generalized vector from a force and a pitch/yaw torque.
pub fn compose(linear: &Vector3<f64>, angular: &Attitude) -> Gen5 {
    Gen5::new(linear.x, linear.y, linear.z, angular.x, angular.y)
}

/// Zero every component whose magnitude is under [`DRIFT_TOLERANCE`].
pub fn suppress_drift(mut v: Attitude) -> Attitude {
    for c in v.iter_mut() {
        if c.abs() < DRIFT_TOLERANCE {
            *c = 0.0;
        }
    }
    v
}

// ---------------------------------------------------------------------------
// Angle of attack
// ---------------------------------------------------------------------------

/// Zenith-angle decomposition of the angle of attack, rad.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleOfAttack {
    pub relative_wind: f64, // zenith angle of the wind-relative velocity
    pub body_axis: f64,     // zenith angle of the body +Z axis
    pub alpha: f64,         // relative_wind - body_axis
}

impl AngleOfAttack {
    /// Build from wind-relative velocity and current attitude.
    /// A zero relative velocity yields a zero relative-wind angle.
    pub fn from_motion(rel_vel: &Vector3<f64>, att: &Attitude) -> Self {
        let speed_sq = rel_vel.norm_squared();
        let relative_wind = if speed_sq > 0.0 {
            (rel_vel.z / speed_sq.sqrt()).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        let body_axis = (att.x.cos() * att.y.cos()).clamp(-1.0, 1.0).acos();
        Self {
            relative_wind,
            body_axis,
            alpha: relative_wind - body_axis,
        }
    }

    /// Body elevation above the horizon, rad.
    pub fn vertical_orientation(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.body_axis
    }
}

// ---------------------------------------------------------------------------
// Thrust deflection command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GimbalCommand {
    pub pitch: f64, // rad, local frame
    pub yaw: f64,   // rad, local frame
}

impl GimbalCommand {
    pub fn as_attitude(&self) -> Attitude {
        Attitude::new(self.pitch, self.yaw)
    }
}
