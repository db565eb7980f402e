//! CRWS HTTP client.
//!
//! Two requests make up a search: the combination list, which maps a
//! timetable combination ID to the guid of today's timetable, and the
//! connection search addressed by that guid. Guids are cached per client
//! and re-resolved once a day or when CRWS reports them expired.

use chrono::{Local, NaiveDate};
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument, warn};

use crate::cache::CombinationCache;
use crate::domain::{CombinationEntry, DepartureTime, QueryResult};

use super::config::ChapsConfig;
use super::convert::{ConversionError, convert_combination, convert_conn_info};
use super::error::ChapsError;
use super::types::{
    ApiException, CombinationInfo, CombinationList, ConnectionsResponse,
    EXCEPTION_EXPIRED_COMBINATION, EXCEPTION_PARALLEL_ACCESS,
};

/// CRWS API client.
///
/// Safe to share between tasks. Guid resolution is serialized so that
/// concurrent searches on a stale combination trigger a single combination
/// list request; connection searches themselves run unserialized.
#[derive(Debug)]
pub struct ChapsClient {
    http: reqwest::Client,
    config: ChapsConfig,
    combinations: CombinationCache,
    resolve_lock: Mutex<()>,
}

impl ChapsClient {
    /// Create a new client with its own connection pool.
    pub fn new(config: ChapsConfig) -> Result<Self, ChapsError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Self::with_http(http, config)
    }

    /// Create a client on top of a caller-owned `reqwest::Client`.
    ///
    /// The configured timeout is applied per request, so it holds whatever
    /// the shared client was built with.
    pub fn with_http(http: reqwest::Client, config: ChapsConfig) -> Result<Self, ChapsError> {
        config.validate()?;

        Ok(Self {
            http,
            config,
            combinations: CombinationCache::new(),
            resolve_lock: Mutex::new(()),
        })
    }

    /// The client configuration.
    pub fn config(&self) -> &ChapsConfig {
        &self.config
    }

    /// The resolved combination cache.
    pub fn combinations(&self) -> &CombinationCache {
        &self.combinations
    }

    /// List the combination IDs available to the configured user.
    ///
    /// Returns an empty list on any failure; the cause is logged.
    #[instrument(skip(self))]
    pub async fn list_combination_ids(&self) -> Vec<String> {
        match self.fetch_combinations().await {
            Ok(combinations) => combinations.into_iter().map(|c| c.id).collect(),
            Err(e) => {
                error!(error = %e, "error getting timetable combination IDs");
                Vec::new()
            }
        }
    }

    /// Resolve a combination ID to the guid for today's timetable.
    pub async fn resolve(&self, combination_id: &str) -> Result<String, ChapsError> {
        self.resolve_at(combination_id, today()).await
    }

    /// Resolve a combination ID as of a given day.
    ///
    /// A cached guid is reused only if it was fetched on `today` and its
    /// timetable is still valid; otherwise the combination list is requested
    /// once. Failures are logged and not retried.
    #[instrument(skip(self))]
    pub async fn resolve_at(
        &self,
        combination_id: &str,
        today: NaiveDate,
    ) -> Result<String, ChapsError> {
        let _guard = self.resolve_lock.lock().await;

        if let Some(entry) = self.combinations.get_fresh(combination_id, today).await {
            debug!(guid = %entry.guid, "using cached timetable combination guid");
            return Ok(entry.guid);
        }

        debug!("updating timetable combination guid");
        match self.discover(combination_id, today).await {
            Ok(entry) => {
                debug!(guid = %entry.guid, valid_to = %entry.valid_to, "found guid");
                let guid = entry.guid.clone();
                self.combinations.insert(combination_id, entry).await;
                Ok(guid)
            }
            Err(e) => {
                error!(error = %e, "error getting timetable combination guid");
                Err(e)
            }
        }
    }

    /// Find up to two connections from `origin` to `destination`.
    ///
    /// Resolves the combination guid first (without any search request if
    /// that fails). On success the whole result is returned at once; on
    /// failure nothing is. If CRWS reports the guid expired it is purged so
    /// the next call resolves it again; a parallel-access rejection leaves
    /// the cache untouched.
    #[instrument(skip(self, start_time), fields(start_time = ?start_time))]
    pub async fn find_connection(
        &self,
        origin: &str,
        destination: &str,
        combination_id: &str,
        start_time: Option<DepartureTime>,
    ) -> Result<QueryResult, ChapsError> {
        let guid = self.resolve(combination_id).await?;

        debug!("checking connection from {origin} to {destination}");
        let result = self
            .search(&guid, origin, destination, combination_id, start_time)
            .await;

        match &result {
            Ok(found) => debug!(
                connections = found.connections.len(),
                first_line = ?found.first_line,
                "connection found"
            ),
            Err(ChapsError::ParallelAccess) => warn!("parallel API access is not allowed"),
            Err(e) => error!(error = %e, "error getting public transport connection data"),
        }

        result
    }

    async fn search(
        &self,
        guid: &str,
        origin: &str,
        destination: &str,
        combination_id: &str,
        start_time: Option<DepartureTime>,
    ) -> Result<QueryResult, ChapsError> {
        let url = format!(
            "{}/{}/connections",
            self.config.itinerary_url.trim_end_matches('/'),
            guid
        );

        let mut params = vec![
            ("from", origin.to_string()),
            ("to", destination.to_string()),
            ("maxCount", self.config.max_count.to_string()),
        ];
        params.extend(self.user_params());
        if let Some(time) = start_time {
            params.push(("dateTime", time.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&params)
            .timeout(self.config.timeout())
            .send()
            .await?;

        debug!(url = %response.url(), "connection response");
        let status = response.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let body = response.text().await?;
            return Err(self.server_error(combination_id, body).await);
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ChapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let decoded: ConnectionsResponse =
            serde_json::from_str(&body).map_err(|e| ChapsError::json(&e, &body))?;

        if decoded.handle.is_none() {
            return Err(ChapsError::NoConnection {
                from: origin.to_string(),
                to: destination.to_string(),
            });
        }

        let conn_info = decoded
            .conn_info
            .ok_or(ConversionError::MissingField("connInfo"))?;
        if let Some(first) = conn_info.connections.first() {
            debug!(id = ?first.id, "found connection");
        }
        let converted = convert_conn_info(&conn_info)?;

        Ok(QueryResult {
            origin: origin.to_string(),
            destination: destination.to_string(),
            combination_id: combination_id.to_string(),
            start_time,
            first_line: converted.first_line(),
            departure: converted.departure,
            duration: converted.duration,
            connections: converted.connections,
        })
    }

    /// Classify an HTTP 500 by the exception code in its JSON body.
    async fn server_error(&self, combination_id: &str, body: String) -> ChapsError {
        let code = ApiException::from_body(&body).and_then(|e| e.exception_code);

        match code {
            Some(EXCEPTION_EXPIRED_COMBINATION) => {
                self.combinations.remove(combination_id).await;
                warn!("removed expired timetable combination {combination_id}");
                ChapsError::ExpiredCombination(combination_id.to_string())
            }
            Some(EXCEPTION_PARALLEL_ACCESS) => ChapsError::ParallelAccess,
            _ => ChapsError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                message: body,
            },
        }
    }

    async fn discover(
        &self,
        combination_id: &str,
        today: NaiveDate,
    ) -> Result<CombinationEntry, ChapsError> {
        let combinations = self.fetch_combinations().await?;

        let info = combinations
            .iter()
            .find(|c| c.id == combination_id)
            .ok_or_else(|| ChapsError::CombinationNotFound(combination_id.to_string()))?;

        let (guid, valid_to) = convert_combination(info)?;
        Ok(CombinationEntry::new(guid, valid_to, today))
    }

    async fn fetch_combinations(&self) -> Result<Vec<CombinationInfo>, ChapsError> {
        let url = format!("{}/", self.config.discovery_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&self.user_params())
            .timeout(self.config.timeout())
            .send()
            .await?;

        debug!(url = %response.url(), "timetable combination response");
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ChapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let list: CombinationList =
            serde_json::from_str(&body).map_err(|e| ChapsError::json(&e, &body))?;

        list.data.ok_or(ChapsError::NoData)
    }

    fn user_params(&self) -> Vec<(&'static str, String)> {
        self.config
            .user_id()
            .map(|id| ("userId", id.to_string()))
            .into_iter()
            .collect()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
