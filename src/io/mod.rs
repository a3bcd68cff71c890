pub mod csv;
pub mod json;

pub use csv::{write_flight_log, write_flight_log_file};
pub use json::{write_summary, write_summary_file, FlightSummary};
