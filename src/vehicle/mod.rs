pub mod config;
pub mod rocket;

pub use config::{presets, LaunchAngle, RocketConfig, ScenarioConfig, TvcConfig};
pub use rocket::Rocket;
