//! Connection leg type.
//!
//! A `ConnectionLeg` is one vehicle ride within a connection, flattened out
//! of the CRWS `trains[].trainData` structure.

use std::fmt;

use serde::Serialize;

/// Marker CRWS appends to request stops ("na znamení").
const REQUEST_STOP_MARKER: &str = " (PZ)";

/// One leg of a connection (one bus, tram, metro or train ride).
///
/// Times are kept as the "HH:MM" strings the API returns. A leg whose
/// arrival point carries no arrival time is modelled as instantaneous, so
/// `arr_time` then holds the departure time of that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionLeg {
    /// Line number (e.g. "22" or "S4")
    pub line: String,
    /// Departure time, "HH:MM"
    pub dep_time: String,
    /// Departure stop name
    pub dep_station: String,
    /// Arrival time, "HH:MM"
    pub arr_time: String,
    /// Arrival stop name
    pub arr_station: String,
    /// Current delay in minutes, only when strictly positive
    pub delay_minutes: Option<u32>,
}

impl ConnectionLeg {
    /// Returns true if the vehicle is reported late.
    pub fn is_delayed(&self) -> bool {
        self.delay_minutes.is_some()
    }

    /// Departure stop name without the request-stop marker.
    pub fn dep_station_name(&self) -> String {
        strip_request_stop(&self.dep_station)
    }

    /// Arrival stop name without the request-stop marker.
    pub fn arr_station_name(&self) -> String {
        strip_request_stop(&self.arr_station)
    }
}

impl fmt::Display for ConnectionLeg {
    /// One aligned row, e.g. `22   07:45 (Chyne, Haje) -> 08:10 (Vypich)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:<5} ({}) -> {:<5} ({})",
            self.line, self.dep_time, self.dep_station, self.arr_time, self.arr_station
        )?;
        if let Some(delay) = self.delay_minutes {
            write!(f, "   !!! {delay}min delayed")?;
        }
        Ok(())
    }
}

/// The marker is removed wherever it occurs, not only at the end.
fn strip_request_stop(name: &str) -> String {
    name.replace(REQUEST_STOP_MARKER, "")
}
