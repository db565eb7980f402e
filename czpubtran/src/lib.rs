//! Czech public transport connection finder.
//!
//! A thin async client for the CHAPS "CRWS" journey-planning API: it
//! resolves timetable combination IDs to the daily-rotating guid the API
//! requires, then fetches the first one or two connections between two
//! stops and flattens them into simple leg records.

pub mod cache;
pub mod chaps;
pub mod domain;

pub use cache::CombinationCache;
pub use chaps::{ChapsClient, ChapsConfig, ChapsError};
pub use domain::{CombinationEntry, ConnectionLeg, DepartureTime, QueryResult};
