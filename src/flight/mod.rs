pub mod resolver;
pub mod types;

pub use resolver::{Assessment, ClaimAssessor, FlightDataSource, JsonFlightSource};
pub use types::{AirlineInfo, AirportInfo, FlightRecord, FlightStatus};
