use nalgebra::Vector3;

use crate::dynamics::frame::{body_axis, rotate};
use crate::dynamics::state::{attitude, compose, Attitude, Gen5};
use crate::physics::gravity::{on_rail, project_on_body_axis};
use crate::vehicle::Rocket;

/// Quadratic drag opposing the wind-relative velocity (ENU, no torque).
///
/// Applied per axis as v·|v| so each component keeps its sign.
pub fn drag(vel: &Gen5, rho: f64, rocket: &Rocket) -> Gen5 {
    let rel = rocket.relative_velocity(vel);
    let signed_sq = rel.component_mul(&rel.abs());
    let f = -0.5 * rocket.cd * rocket.front_area() * rho * signed_sq;
    compose(&f, &Attitude::zeros())
}

/// Triangular lift-coefficient profile: `cl` at zero angle of attack,
/// falling linearly to zero at the critical angle, zero past stall.
pub fn lift_coefficient(cl: f64, alpha: f64, critical: f64) -> f64 {
    let a = alpha.abs();
    if a >= critical {
        0.0
    } else {
        cl * (1.0 - a / critical)
    }
}

/// Lift perpendicular to the wind-relative velocity, with the pitch/yaw
/// torque it produces about the centre of mass.
///
/// `alpha` is the most recent angle-of-attack sample. On the rail the force
/// is reduced to its body-axis component and produces no torque.
pub fn lift(pos: &Gen5, vel: &Gen5, alpha: f64, rho: f64, rocket: &Rocket) -> Gen5 {
    let att = attitude(pos);
    let rel = rocket.relative_velocity(vel);
    let axis = body_axis(&att);
    let direction = rel.cross(&axis.cross(&rel));

    let c = lift_coefficient(rocket.cl, alpha, rocket.critical_aoa);
    let magnitude = (0.5 * c * rocket.side_area() * rho * rel.component_mul(&rel)).norm();

    let global = if direction.norm_squared() != 0.0 {
        direction.normalize() * magnitude
    } else {
        Vector3::zeros()
    };

    if on_rail(pos, rocket.rail_length) {
        return compose(&project_on_body_axis(&att, &global), &Attitude::zeros());
    }

    let local = rotate(&att, &global, true);
    let arm = rocket.cp_height - rocket.cm_height;
    compose(&global, &Attitude::new(-local.y * arm, local.x * arm))
}
