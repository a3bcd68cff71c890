use std::f64::consts::FRAC_PI_2;

use nalgebra::{Matrix3, Vector3};

use super::state::{suppress_drift, Attitude};

// ---------------------------------------------------------------------------
// Body <-> ENU frame rotation (pitch about X, then yaw about Y; no roll)
// ---------------------------------------------------------------------------

/// Rotation matrix taking body-frame vectors into the global ENU frame.
pub fn rotation_matrix(att: &Attitude) -> Matrix3<f64> {
    let (sp, cp) = att.x.sin_cos();
    let (sy, cy) = att.y.sin_cos();
    Matrix3::new(
        cy,   sy * sp, sy * cp,
        0.0,  cp,      -sp,
        -sy,  cy * sp, cy * cp,
    )
}

/// Rotate `v` from body to global frame, or global to body when `inverse`.
/// The inverse is the transpose since the matrix is orthonormal.
pub fn rotate(att: &Attitude, v: &Vector3<f64>, inverse: bool) -> Vector3<f64> {
    let m = rotation_matrix(att);
    if inverse {
        m.transpose() * v
    } else {
        m * v
    }
}

/// Body +Z axis expressed in the global frame.
pub fn body_axis(att: &Attitude) -> Vector3<f64> {
    rotate(att, &Vector3::z(), false)
}

/// Initial pitch/yaw from launch elevation (from horizontal) and azimuth
/// (from North), both in degrees.
pub fn launch_attitude(elevation_deg: f64, azimuth_deg: f64) -> Attitude {
    let tilt = FRAC_PI_2 - elevation_deg.to_radians();
    let az = azimuth_deg.to_radians();
    suppress_drift(Attitude::new(-tilt * az.cos(), tilt * az.sin()))
}
