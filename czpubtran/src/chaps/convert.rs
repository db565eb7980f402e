//! Conversion from CRWS DTOs to domain types.
//!
//! Flattens the nested `connInfo.connections[].trains[].trainData` structure
//! into ordered `ConnectionLeg` lists. Conversion is all-or-nothing: one
//! malformed leg fails the whole response.

use chrono::NaiveDate;

use crate::domain::{ConnectionLeg, MAX_CONNECTIONS, parse_validity_date};

use super::types::{CombinationInfo, ConnInfo, Train};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a date string
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Connections extracted from one search response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertedConnections {
    /// Departure time of the first connection
    pub departure: Option<String>,
    /// Duration of the first connection
    pub duration: Option<String>,
    /// Legs of up to [`MAX_CONNECTIONS`] connections
    pub connections: Vec<Vec<ConnectionLeg>>,
}

impl ConvertedConnections {
    /// Line of the first leg of the first connection.
    pub fn first_line(&self) -> Option<String> {
        self.connections
            .first()
            .and_then(|legs| legs.first())
            .map(|leg| leg.line.clone())
    }
}

/// Map one ride to a leg.
///
/// The first route point gives the departure, the second the arrival. A
/// second point without `arrTime` is treated as instantaneous and its
/// `depTime` is used as arrival.
pub fn convert_train(train: &Train) -> Result<ConnectionLeg, ConversionError> {
    let (boarding, alighting) = match train.train_data.route.as_slice() {
        [boarding, alighting, ..] => (boarding, alighting),
        _ => return Err(ConversionError::MissingField("trainData.route[1]")),
    };

    let dep_time = boarding
        .dep_time
        .clone()
        .ok_or(ConversionError::MissingField("route[0].depTime"))?;

    let arr_time = alighting
        .arr_time
        .clone()
        .or_else(|| alighting.dep_time.clone())
        .ok_or(ConversionError::MissingField("route[1].arrTime"))?;

    Ok(ConnectionLeg {
        line: train.train_data.info.num1.to_string(),
        dep_time,
        dep_station: boarding.station.name.clone(),
        arr_time,
        arr_station: alighting.station.name.clone(),
        delay_minutes: positive_delay(train.delay),
    })
}

/// Map every ride of a connection, keeping travel order.
pub fn convert_trains(trains: &[Train]) -> Result<Vec<ConnectionLeg>, ConversionError> {
    trains.iter().map(convert_train).collect()
}

/// Convert the `connInfo` block of a search response.
///
/// The first connection provides departure and duration; at most
/// [`MAX_CONNECTIONS`] connections are mapped.
pub fn convert_conn_info(conn_info: &ConnInfo) -> Result<ConvertedConnections, ConversionError> {
    let Some(primary) = conn_info.connections.first() else {
        return Ok(ConvertedConnections::default());
    };

    let duration = primary
        .time_length
        .clone()
        .ok_or(ConversionError::MissingField("connections[0].timeLength"))?;

    let departure = primary
        .trains
        .first()
        .ok_or(ConversionError::MissingField("connections[0].trains[0]"))?
        .train_data
        .route
        .first()
        .and_then(|point| point.dep_time.clone())
        .ok_or(ConversionError::MissingField("route[0].depTime"))?;

    let connections = conn_info
        .connections
        .iter()
        .take(MAX_CONNECTIONS)
        .map(|connection| convert_trains(&connection.trains))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConvertedConnections {
        departure: Some(departure),
        duration: Some(duration),
        connections,
    })
}

/// Extract guid and validity date from a combination record.
pub fn convert_combination(info: &CombinationInfo) -> Result<(String, NaiveDate), ConversionError> {
    let guid = info
        .guid
        .clone()
        .ok_or(ConversionError::MissingField("guid"))?;
    let valid_to = info
        .tt_valid_to
        .as_deref()
        .ok_or(ConversionError::MissingField("ttValidTo"))?;
    let valid_to = parse_validity_date(valid_to)
        .map_err(|_| ConversionError::InvalidDate(valid_to.to_string()))?;
    Ok((guid, valid_to))
}

/// CRWS reports on-time rides as zero (or omits the field); only real
/// delays are kept. Fractional minutes round up.
fn positive_delay(delay: Option<f64>) -> Option<u32> {
    delay
        .filter(|&minutes| minutes > 0.0)
        .map(|minutes| minutes.ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::super::types::{
        Connection, LineNumber, RoutePoint, RouteStation, TrainData, TrainInfo,
    };
    use super::*;
    use proptest::prelude::*;

    fn point(dep: Option<&str>, arr: Option<&str>, name: &str) -> RoutePoint {
        RoutePoint {
            dep_time: dep.map(String::from),
            arr_time: arr.map(String::from),
            station: RouteStation { name: name.into() },
        }
    }

    fn train(line: &str, delay: Option<f64>, route: Vec<RoutePoint>) -> Train {
        Train {
            delay,
            train_data: TrainData {
                info: TrainInfo {
                    num1: LineNumber::Text(line.into()),
                },
                route,
            },
        }
    }

    fn simple_train(line: &str, delay: Option<f64>) -> Train {
        train(
            line,
            delay,
            vec![
                point(Some("07:45"), None, "Chyne, Haje"),
                point(Some("08:10"), Some("08:09"), "Zlicin"),
            ],
        )
    }

    fn connection(time_length: Option<&str>, trains: Vec<Train>) -> Connection {
        Connection {
            id: Some(1),
            time_length: time_length.map(String::from),
            trains,
        }
    }

    #[test]
    fn leg_uses_arrival_time_when_present() {
        let leg = convert_train(&simple_train("347", None)).unwrap();
        assert_eq!(leg.line, "347");
        assert_eq!(leg.dep_time, "07:45");
        assert_eq!(leg.dep_station, "Chyne, Haje");
        assert_eq!(leg.arr_time, "08:09");
        assert_eq!(leg.arr_station, "Zlicin");
    }

    #[test]
    fn leg_without_arrival_time_is_instantaneous() {
        let t = train(
            "B",
            None,
            vec![
                point(Some("08:15"), None, "Zlicin"),
                point(Some("08:40"), None, "Mustek"),
            ],
        );
        let leg = convert_train(&t).unwrap();
        assert_eq!(leg.arr_time, "08:40");
    }

    #[test]
    fn delay_kept_only_when_positive() {
        assert_eq!(
            convert_train(&simple_train("1", Some(5.0)))
                .unwrap()
                .delay_minutes,
            Some(5)
        );
        assert_eq!(
            convert_train(&simple_train("1", Some(0.0)))
                .unwrap()
                .delay_minutes,
            None
        );
        assert_eq!(
            convert_train(&simple_train("1", Some(-2.0)))
                .unwrap()
                .delay_minutes,
            None
        );
        assert_eq!(
            convert_train(&simple_train("1", None)).unwrap().delay_minutes,
            None
        );
    }

    #[test]
    fn fractional_delay_rounds_up() {
        let delay = |minutes| {
            convert_train(&simple_train("1", Some(minutes)))
                .unwrap()
                .delay_minutes
        };
        assert_eq!(delay(2.0), Some(2));
        assert_eq!(delay(0.5), Some(1));
        assert_eq!(delay(-0.5), None);
    }

    #[test]
    fn numeric_line_rendered_as_string() {
        let mut t = simple_train("x", None);
        t.train_data.info.num1 = LineNumber::Number(180);
        assert_eq!(convert_train(&t).unwrap().line, "180");
    }

    #[test]
    fn route_with_one_point_is_rejected() {
        let t = train("1", None, vec![point(Some("07:45"), None, "A")]);
        assert_eq!(
            convert_train(&t),
            Err(ConversionError::MissingField("trainData.route[1]"))
        );
    }

    #[test]
    fn arrival_point_without_times_is_rejected() {
        let t = train(
            "1",
            None,
            vec![point(Some("07:45"), None, "A"), point(None, None, "B")],
        );
        assert!(convert_train(&t).is_err());
    }

    #[test]
    fn trains_keep_travel_order() {
        let legs = convert_trains(&[simple_train("347", None), simple_train("B", None)]).unwrap();
        let lines: Vec<_> = legs.iter().map(|l| l.line.as_str()).collect();
        assert_eq!(lines, ["347", "B"]);
    }

    #[test]
    fn conn_info_empty() {
        let converted = convert_conn_info(&ConnInfo {
            connections: Vec::new(),
        })
        .unwrap();
        assert_eq!(converted, ConvertedConnections::default());
        assert!(converted.first_line().is_none());
    }

    #[test]
    fn conn_info_primary_and_alternative() {
        let conn_info = ConnInfo {
            connections: vec![
                connection(
                    Some("0:50"),
                    vec![simple_train("347", None), simple_train("B", Some(2.0))],
                ),
                connection(None, vec![simple_train("180", None)]),
                connection(Some("1:30"), vec![simple_train("9", None)]),
            ],
        };
        let converted = convert_conn_info(&conn_info).unwrap();
        assert_eq!(converted.duration.as_deref(), Some("0:50"));
        assert_eq!(converted.departure.as_deref(), Some("07:45"));
        assert_eq!(converted.first_line().as_deref(), Some("347"));
        assert_eq!(converted.connections.len(), 2);
        assert_eq!(converted.connections[0].len(), 2);
        assert_eq!(converted.connections[1][0].line, "180");
    }

    #[test]
    fn conn_info_primary_without_trains_is_rejected() {
        let conn_info = ConnInfo {
            connections: vec![connection(Some("0:10"), Vec::new())],
        };
        assert!(convert_conn_info(&conn_info).is_err());
    }

    #[test]
    fn conn_info_malformed_alternative_fails_everything() {
        let broken = train("9", None, vec![point(Some("09:00"), None, "A")]);
        let conn_info = ConnInfo {
            connections: vec![
                connection(Some("0:50"), vec![simple_train("347", None)]),
                connection(Some("0:55"), vec![broken]),
            ],
        };
        assert!(convert_conn_info(&conn_info).is_err());
    }

    #[test]
    fn combination_record() {
        let info = CombinationInfo {
            id: "ABCz".into(),
            guid: Some("G1".into()),
            tt_valid_to: Some("31.12.2099".into()),
        };
        let (guid, valid_to) = convert_combination(&info).unwrap();
        assert_eq!(guid, "G1");
        assert_eq!(valid_to, NaiveDate::from_ymd_opt(2099, 12, 31).unwrap());
    }

    #[test]
    fn combination_record_with_bad_date() {
        let info = CombinationInfo {
            id: "ABCz".into(),
            guid: Some("G1".into()),
            tt_valid_to: Some("2099-12-31".into()),
        };
        assert_eq!(
            convert_combination(&info),
            Err(ConversionError::InvalidDate("2099-12-31".into()))
        );
    }

    #[test]
    fn combination_record_without_guid() {
        let info = CombinationInfo {
            id: "ABCz".into(),
            guid: None,
            tt_valid_to: Some("31.12.2099".into()),
        };
        assert_eq!(
            convert_combination(&info),
            Err(ConversionError::MissingField("guid"))
        );
    }

    proptest! {
        #[test]
        fn delay_present_iff_positive(delay in -10_000i32..10_000) {
            let leg = convert_train(&simple_train("1", Some(f64::from(delay)))).unwrap();
            prop_assert_eq!(leg.delay_minutes.is_some(), delay > 0);
            if let Some(minutes) = leg.delay_minutes {
                prop_assert_eq!(i64::from(minutes), i64::from(delay));
            }
        }

        #[test]
        fn arrival_falls_back_to_departure(
            dep in "[0-2][0-9]:[0-5][0-9]",
            arr in proptest::option::of("[0-2][0-9]:[0-5][0-9]")
        ) {
            let t = train(
                "1",
                None,
                vec![
                    point(Some("07:00"), None, "A"),
                    point(Some(dep.as_str()), arr.as_deref(), "B"),
                ],
            );
            let leg = convert_train(&t).unwrap();
            prop_assert_eq!(leg.arr_time, arr.unwrap_or(dep));
        }
    }
}
