use crate::dynamics::state::Gen5;

// ---------------------------------------------------------------------------
// Semi-implicit (symplectic) Euler with ground-contact freeze
// ---------------------------------------------------------------------------

/// Advance one step: velocity first, then position from the new velocity.
///
/// Once the altitude is below zero the velocity is forced to zero, which
/// pins the vehicle where it hit the ground.
pub fn semi_implicit_euler(pos: &Gen5, vel: &Gen5, acc: &Gen5, dt: f64) -> (Gen5, Gen5) {
    let vel_next = if pos[2] >= 0.0 {
        vel + acc * dt
    } else {
        Gen5::zeros()
    };
    let pos_next = pos + vel_next * dt;
    (pos_next, vel_next)
}
