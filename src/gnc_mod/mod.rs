pub mod pid;
pub mod tvc;

pub use pid::Pid;
pub use tvc::TvcController;
