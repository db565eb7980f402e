//! CHAPS CRWS (Czech public transport timetables) client.
//!
//! This module provides an HTTP client for the CRWS REST API
//! (<https://crws.docs.apiary.io/>), which searches connections across
//! Czech public transport timetables.
//!
//! Key characteristics of CRWS:
//! - Searches are addressed by a timetable **guid**, not by the combination
//!   ID users know. The guid is looked up in the combination list and
//!   changes over time, so it is cached for one day at most
//! - An expired guid is reported as HTTP 500 with exception code 17
//! - Only one request per user may run at a time; violations are reported
//!   as HTTP 500 with exception code 1023
//! - Times are "HH:MM" strings in Czech local time

mod client;
mod config;
mod convert;
mod error;
mod types;

pub use client::ChapsClient;
pub use config::{ChapsConfig, DEFAULT_DISCOVERY_URL, DEFAULT_ITINERARY_URL};
pub use convert::{
    ConversionError, ConvertedConnections, convert_combination, convert_conn_info, convert_train,
    convert_trains,
};
pub use error::ChapsError;
pub use types::{
    ApiException, CombinationInfo, CombinationList, ConnInfo, Connection, ConnectionsResponse,
    EXCEPTION_EXPIRED_COMBINATION, EXCEPTION_PARALLEL_ACCESS, LineNumber, RoutePoint,
    RouteStation, Train, TrainData, TrainInfo,
};
