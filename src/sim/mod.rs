pub mod event;
pub mod integrator;
pub mod runner;
pub mod series;
pub mod sweep;

pub use event::{detect_events, EventKind, FlightEvent};
pub use integrator::semi_implicit_euler;
pub use runner::Simulation;
pub use series::{FlightLog, Snapshot};
pub use sweep::{run_parallel, SweepCase};
