//! HTTP client for the federation "dofa" REST API.
//!
//! Wraps `reqwest` with typed decoding of the three resources the overlay
//! reads. Requests can be routed through a transparent relay: the relay
//! prefix is followed by the percent-encoded target URL.

use std::time::Duration;

use clubmap_core::{AppConfig, Club, ClubSource, Engagement, Pool};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::FffError;
use crate::normalize::{normalize_club, normalize_engagement, normalize_poule};
use crate::types::{ClubRecord, EngagementRecord, PouleRecord};

const DEFAULT_BASE_URL: &str = "https://api-dofa.prd-aws.fff.fr/api";

/// Only the first phase of a championship is plotted.
const PHASE_NUMBER: &str = "1";

/// Characters left unescaped when the target URL is embedded in the relay
/// query string (same set as `encodeURIComponent`).
const RELAY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the federation API.
///
/// Use [`FffClient::new`] for production, [`FffClient::with_base_url`] to
/// point at a mock server in tests, and [`FffClient::with_relay`] to route
/// every request through a relay.
pub struct FffClient {
    client: Client,
    base_url: Url,
    relay_url: Option<String>,
}

impl FffClient {
    /// Creates a client pointed at the production federation API.
    ///
    /// # Errors
    ///
    /// Returns [`FffError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FffError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FffError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FffError::InvalidUrl`] if `base_url`
    /// cannot be parsed or cannot carry path segments.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FffError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so pushed path segments
        // land below the API root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FffError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FffError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            relay_url: None,
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`FffClient::with_base_url`] and [`FffClient::with_relay`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FffError> {
        let client = Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        match &config.relay_url {
            Some(relay) => client.with_relay(relay),
            None => Ok(client),
        }
    }

    /// Routes every request through `relay_prefix` (e.g. `https://corsproxy.io/?`).
    ///
    /// The prefix is kept verbatim; the encoded target URL is appended to it.
    ///
    /// # Errors
    ///
    /// Returns [`FffError::InvalidUrl`] if the prefix is not an http(s) URL.
    pub fn with_relay(mut self, relay_prefix: &str) -> Result<Self, FffError> {
        let relay_prefix = relay_prefix.trim();
        if !(relay_prefix.starts_with("http://") || relay_prefix.starts_with("https://")) {
            return Err(FffError::InvalidUrl {
                url: relay_prefix.to_owned(),
                reason: "relay prefix must be an http(s) URL".to_owned(),
            });
        }
        self.relay_url = Some(relay_prefix.to_owned());
        Ok(self)
    }

    /// Fetches one club by federation club number.
    ///
    /// # Errors
    ///
    /// - [`FffError::Http`] on network failure.
    /// - [`FffError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FffError::Deserialize`] if the body is not a club record.
    /// - [`FffError::InvalidUrl`] if the request URL cannot be built.
    pub async fn try_fetch_club(&self, club_id: u64) -> Result<Club, FffError> {
        let club_segment = format!("{club_id}.json");
        let url = self.resource_url(&["clubs", &club_segment], &[])?;
        let body = self.request_json(&url).await?;
        let record: ClubRecord =
            serde_json::from_value(body).map_err(|e| FffError::Deserialize {
                context: format!("club(id={club_id})"),
                source: e,
            })?;
        Ok(normalize_club(record, club_id))
    }

    /// Lists the pools of a championship's first phase.
    ///
    /// Entries that fail to decode are skipped and logged.
    ///
    /// # Errors
    ///
    /// Same classes as [`FffClient::try_fetch_club`]; `Deserialize` is only
    /// returned when the body is not a JSON array.
    pub async fn try_fetch_poules(&self, champ_id: &str) -> Result<Vec<Pool>, FffError> {
        let url = self.resource_url(
            &["compets", champ_id, "phases", PHASE_NUMBER, "poules.json"],
            &[],
        )?;
        let body = self.request_json(&url).await?;
        let records: Vec<PouleRecord> = decode_list(body, &format!("poules(champ={champ_id})"))?;
        Ok(records.iter().map(normalize_poule).collect())
    }

    /// Lists the engagements of one pool of a championship's first phase.
    ///
    /// Entries that fail to decode are skipped and logged.
    ///
    /// # Errors
    ///
    /// Same classes as [`FffClient::try_fetch_poules`].
    pub async fn try_fetch_engagements(
        &self,
        champ_id: &str,
        poule_id: u32,
    ) -> Result<Vec<Engagement>, FffError> {
        let poule = poule_id.to_string();
        let url = self.resource_url(
            &["engagements.json"],
            &[
                ("competition.cp_no", champ_id),
                ("phase.ph_no", PHASE_NUMBER),
                ("poule.gp_no", &poule),
            ],
        )?;
        let body = self.request_json(&url).await?;
        let records: Vec<EngagementRecord> = decode_list(
            body,
            &format!("engagements(champ={champ_id}, poule={poule_id})"),
        )?;
        Ok(records.into_iter().map(normalize_engagement).collect())
    }

    /// Builds the origin URL of a resource below the API root.
    ///
    /// Path segments and query values are percent-encoded by [`Url`].
    fn resource_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, FffError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FffError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Returns the URL actually requested: `target` itself, or the relay
    /// prefix followed by the encoded target.
    fn request_url(&self, target: &Url) -> Result<Url, FffError> {
        let Some(relay) = &self.relay_url else {
            return Ok(target.clone());
        };
        let relayed = format!(
            "{relay}{}",
            utf8_percent_encode(target.as_str(), RELAY_ENCODE_SET)
        );
        Url::parse(&relayed).map_err(|e| FffError::InvalidUrl {
            url: relayed.clone(),
            reason: e.to_string(),
        })
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FffError::Http`] on network failure,
    /// [`FffError::UnexpectedStatus`] on a non-2xx status and
    /// [`FffError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, target: &Url) -> Result<serde_json::Value, FffError> {
        let url = self.request_url(target)?;
        tracing::debug!(
            url = %target,
            relayed = self.relay_url.is_some(),
            "federation API request"
        );

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FffError::UnexpectedStatus {
                status: status.as_u16(),
                url: target.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FffError::Deserialize {
            context: target.to_string(),
            source: e,
        })
    }
}

/// Decodes a JSON array entry by entry, skipping entries that do not match `T`.
fn decode_list<T: DeserializeOwned>(
    body: serde_json::Value,
    context: &str,
) -> Result<Vec<T>, FffError> {
    let items: Vec<serde_json::Value> =
        serde_json::from_value(body).map_err(|e| FffError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(context, index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect())
}

impl ClubSource for FffClient {
    async fn fetch_club(&self, club_id: u64) -> Option<Club> {
        match self.try_fetch_club(club_id).await {
            Ok(club) => Some(club),
            Err(e) => {
                tracing::warn!(club_id, error = %e, "failed to fetch club");
                None
            }
        }
    }

    async fn fetch_poules(&self, champ_id: &str) -> Vec<Pool> {
        self.try_fetch_poules(champ_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(champ_id, error = %e, "failed to fetch poules");
                Vec::new()
            })
    }

    async fn fetch_engagements(&self, champ_id: &str, poule_id: u32) -> Vec<Engagement> {
        self.try_fetch_engagements(champ_id, poule_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(champ_id, poule_id, error = %e, "failed to fetch engagements");
                Vec::new()
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
