//! CRWS API response DTOs.
//!
//! These types map directly to the CRWS JSON responses. Only the fields the
//! client reads are modelled; everything else is ignored. Fields CRWS is
//! known to omit are `Option`.

use std::fmt;

use serde::Deserialize;
use serde::de::IgnoredAny;

/// CRWS exception code for a combination guid that is no longer valid.
pub const EXCEPTION_EXPIRED_COMBINATION: i64 = 17;

/// CRWS exception code for a request rejected because another one is
/// running for the same user.
pub const EXCEPTION_PARALLEL_ACCESS: i64 = 1023;

/// Response from the combination list endpoint (`GET /api/`).
#[derive(Debug, Clone, Deserialize)]
pub struct CombinationList {
    /// Available timetable combinations. Absent when the API has nothing
    /// for the user.
    pub data: Option<Vec<CombinationInfo>>,
}

/// One timetable combination.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationInfo {
    /// Combination ID, e.g. "ABCz" or "PID".
    pub id: String,

    /// Guid to use in connection requests.
    pub guid: Option<String>,

    /// Last day of timetable validity, "DD.MM.YYYY".
    pub tt_valid_to: Option<String>,
}

/// Response from `GET /api/{guid}/connections`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsResponse {
    /// Search handle. Present on every successful search; only its
    /// presence matters.
    pub handle: Option<IgnoredAny>,

    /// Found connections.
    pub conn_info: Option<ConnInfo>,
}

/// Container for found connections.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnInfo {
    pub connections: Vec<Connection>,
}

/// One connection (itinerary).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Connection ID within the search handle.
    pub id: Option<i64>,

    /// Total travel time, e.g. "0:35".
    pub time_length: Option<String>,

    /// Vehicle rides in travel order.
    pub trains: Vec<Train>,
}

/// One vehicle ride within a connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    /// Current delay in minutes. Omitted or zero when on time.
    pub delay: Option<f64>,

    pub train_data: TrainData,
}

/// Line and route of a ride.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainData {
    pub info: TrainInfo,

    /// Boarding point followed by alighting point.
    pub route: Vec<RoutePoint>,
}

/// Line information.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainInfo {
    /// Primary line number.
    pub num1: LineNumber,
}

/// A line number, which CRWS sends either as a string or as a bare integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LineNumber {
    Text(String),
    Number(i64),
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumber::Text(s) => f.write_str(s),
            LineNumber::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A stop on a ride's route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePoint {
    /// Departure time, "HH:MM".
    pub dep_time: Option<String>,

    /// Arrival time, "HH:MM". Omitted on some points.
    pub arr_time: Option<String>,

    pub station: RouteStation,
}

/// Stop identification on a route point.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStation {
    pub name: String,
}

/// Error body CRWS returns alongside HTTP 500.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiException {
    pub exception_code: Option<i64>,
    pub exception_message: Option<String>,
}

impl ApiException {
    /// Decode an error body, whatever content type it was served with.
    ///
    /// Returns `None` if the body is not a JSON object.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
