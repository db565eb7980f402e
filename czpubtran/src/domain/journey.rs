//! Query result types.
//!
//! A `QueryResult` is everything one successful connection search produces.
//! It is built in one piece after the response has been fully mapped, so a
//! failed search never leaves a half-filled result behind.

use serde::Serialize;

use super::{ConnectionLeg, DepartureTime};

/// Maximum number of alternative connections requested from the API.
pub const MAX_CONNECTIONS: usize = 2;

/// Result of a successful connection search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Origin stop as passed by the caller
    pub origin: String,
    /// Destination stop as passed by the caller
    pub destination: String,
    /// Timetable combination the search ran against
    pub combination_id: String,
    /// Departure filter, if one was given
    pub start_time: Option<DepartureTime>,
    /// Departure time of the first connection, "HH:MM"
    pub departure: Option<String>,
    /// Total duration of the first connection, as returned (e.g. "0:35")
    pub duration: Option<String>,
    /// Line of the first leg of the first connection
    pub first_line: Option<String>,
    /// Up to [`MAX_CONNECTIONS`] alternatives, each an ordered list of legs
    pub connections: Vec<Vec<ConnectionLeg>>,
}

impl QueryResult {
    /// Legs of the first connection (empty if none was found).
    pub fn primary(&self) -> &[ConnectionLeg] {
        self.connections.first().map_or(&[], Vec::as_slice)
    }

    /// Legs of the second connection, if the API returned one.
    pub fn alternative(&self) -> Option<&[ConnectionLeg]> {
        self.connections.get(1).map(Vec::as_slice)
    }

    /// Compact form of the first connection: lines joined by transfer stops.
    ///
    /// `"22-Vypich-180"` for a ride on line 22 with a change to line 180
    /// at Vypich.
    pub fn short_description(&self) -> String {
        let mut out = String::new();
        for (i, leg) in self.primary().iter().enumerate() {
            if i > 0 {
                out.push('-');
                out.push_str(&leg.dep_station_name());
                out.push('-');
            }
            out.push_str(&leg.line);
        }
        out
    }

    /// One row per leg of the first connection, newline separated.
    pub fn long_description(&self) -> String {
        self.primary()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Delayed legs of the first connection, e.g. `"line 22 - 4min delay"`.
    ///
    /// Empty when everything runs on time.
    pub fn delay_summary(&self) -> String {
        self.primary()
            .iter()
            .filter_map(|leg| {
                leg.delay_minutes
                    .map(|delay| format!("line {} - {delay}min delay", leg.line))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(line: &str, from: &str, to: &str, delay: Option<u32>) -> ConnectionLeg {
        ConnectionLeg {
            line: line.into(),
            dep_time: "07:45".into(),
            dep_station: from.into(),
            arr_time: "08:10".into(),
            arr_station: to.into(),
            delay_minutes: delay,
        }
    }

    fn result(connections: Vec<Vec<ConnectionLeg>>) -> QueryResult {
        QueryResult {
            origin: "Chyne, Haje".into(),
            destination: "Ortenovo namesti".into(),
            combination_id: "ABCz".into(),
            start_time: None,
            departure: Some("07:45".into()),
            duration: Some("0:50".into()),
            first_line: connections
                .first()
                .and_then(|legs| legs.first())
                .map(|leg| leg.line.clone()),
            connections,
        }
    }

    #[test]
    fn primary_and_alternative() {
        let r = result(vec![
            vec![leg("22", "A", "B", None)],
            vec![leg("180", "A", "B", None)],
        ]);
        assert_eq!(r.primary()[0].line, "22");
        assert_eq!(r.alternative().unwrap()[0].line, "180");
    }

    #[test]
    fn empty_result() {
        let r = result(Vec::new());
        assert!(r.primary().is_empty());
        assert!(r.alternative().is_none());
        assert_eq!(r.short_description(), "");
        assert_eq!(r.long_description(), "");
        assert_eq!(r.delay_summary(), "");
    }

    #[test]
    fn short_description_joins_transfers() {
        let r = result(vec![vec![
            leg("347", "Chyne, Haje", "Zlicin", None),
            leg("B", "Zlicin", "Mustek", None),
            leg("9", "Mustek (PZ)", "Ortenovo namesti", None),
        ]]);
        assert_eq!(r.short_description(), "347-Zlicin-B-Mustek-9");
    }

    #[test]
    fn long_description_one_row_per_leg() {
        let r = result(vec![vec![
            leg("347", "Chyne, Haje", "Zlicin", None),
            leg("B", "Zlicin", "Mustek", Some(3)),
        ]]);
        let long = r.long_description();
        let rows: Vec<&str> = long.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("347  07:45 (Chyne, Haje)"));
        assert!(rows[1].ends_with("!!! 3min delayed"));
    }

    #[test]
    fn delay_summary_lists_only_late_legs() {
        let r = result(vec![vec![
            leg("347", "A", "B", Some(2)),
            leg("B", "B", "C", None),
            leg("9", "C", "D", Some(7)),
        ]]);
        assert_eq!(
            r.delay_summary(),
            "line 347 - 2min delay | line 9 - 7min delay"
        );
    }
}
