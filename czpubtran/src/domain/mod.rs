//! Domain types for the connection finder.
//!
//! Plain value types produced by the client: resolved timetable
//! combinations, connection legs and the result of one search.

mod combination;
mod journey;
mod leg;
mod time;

pub use combination::CombinationEntry;
pub use journey::{MAX_CONNECTIONS, QueryResult};
pub use leg::ConnectionLeg;
pub use time::{DepartureTime, InvalidTime, parse_validity_date};
