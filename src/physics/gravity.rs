use nalgebra::Vector3;

use crate::dynamics::frame::rotate;
use crate::dynamics::state::{attitude, compose, translational, Attitude, Gen5, G0};

/// Whether the vehicle is still constrained by the launch rail.
pub fn on_rail(pos: &Gen5, rail_length: f64) -> bool {
    translational(pos).norm() < rail_length
}

/// Keep only the body-axis component of a global-frame force, expressed back
/// in the global frame. Models the rail reacting everything off-axis.
pub fn project_on_body_axis(att: &Attitude, force: &Vector3<f64>) -> Vector3<f64> {
    let axial = rotate(att, force, true).z;
    rotate(att, &Vector3::new(0.0, 0.0, axial), false)
}

/// Weight as a generalized force (ENU, never a torque).
///
/// While on the rail, only the component along the rail survives.
pub fn weight(pos: &Gen5, mass: f64, rail_length: f64) -> Gen5 {
    let mut w = Vector3::new(0.0, 0.0, -G0 * mass);
    if on_rail(pos, rail_length) {
        w = project_on_body_axis(&attitude(pos), &w);
    }
    compose(&w, &Attitude::zeros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_flight_weight_points_down() {
        let pos = Gen5::new(0.0, 0.0, 500.0, 0.2, 0.1);
        let w = weight(&pos, 10.0, 5.0);
        assert!((w[2] + 10.0 * G0).abs() < 1e-12);
        assert_eq!(w[0], 0.0);
        assert_eq!(w[1], 0.0);
    }

    #[test]
    fn rail_weight_is_along_body_axis() {
        let pos = Gen5::new(0.0, 0.0, 0.0, 0.0, 10.0_f64.to_radians());
        let w = weight(&pos, 10.0, 5.0);
        let axis = crate::dynamics::frame::body_axis(&attitude(&pos));
        let f = translational(&w);
        // parallel to the rail and reduced by cos(tilt)
        assert!(f.cross(&axis).norm() < 1e-9);
        assert!((f.norm() - 10.0 * G0 * 10.0_f64.to_radians().cos()).abs() < 1e-9);
        assert_eq!(w[3], 0.0);
        assert_eq!(w[4], 0.0);
    }

    #[test]
    fn rail_check_ignores_angles() {
        let pos = Gen5::new(3.0, 0.0, 3.9, 2.0, 2.0);
        assert!(on_rail(&pos, 5.0));
        let pos = Gen5::new(3.0, 0.0, 4.1, 0.0, 0.0);
        assert!(!on_rail(&pos, 5.0));
    }
}
