pub mod frame;
pub mod state;

pub use frame::{body_axis, launch_attitude, rotate, rotation_matrix};
pub use state::{AngleOfAttack, Attitude, Gen5, GimbalCommand, G0};
