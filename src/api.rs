//! SL API client for site lookup and real-time departures.
//!
//! Two GET endpoints are used: `typeahead.json` to validate the site id and
//! resolve its display name, and `realtimedeparturesV4.json` for the
//! departure board. The wire types here match the JSON the API produces;
//! everything not needed by the delay pipeline is ignored on decode.

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::CheckError;

/// Default API base, overridable through the builder for tests.
const DEFAULT_ENDPOINT: &str = "https://api.sl.se/api2";

/// Traffic category to evaluate. Maps to the API's own category labels via
/// [`TrafficType::category_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum TrafficType {
    Bus,
    Metro,
    Train,
}

impl TrafficType {
    /// Key used for this category in the departure response.
    pub fn category_key(self) -> &'static str {
        match self {
            TrafficType::Bus => "Buses",
            TrafficType::Metro => "Metros",
            TrafficType::Train => "Trains",
        }
    }
}

/// One raw departure record. Only the two timestamps matter for delay
/// computation; the rest of the record is dropped on decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Departure {
    /// Scheduled departure, `YYYY-MM-DDTHH:MM:SS`, no zone offset.
    pub time_tabled_date_time: String,
    /// Expected departure, same format and implicit zone.
    pub expected_date_time: String,
}

/// The departure board for one site: per-category record arrays.
///
/// A category missing from the response is a valid empty result, not an
/// error, hence the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureBoard {
    #[serde(default)]
    pub buses: Vec<Departure>,
    #[serde(default)]
    pub metros: Vec<Departure>,
    #[serde(default)]
    pub trains: Vec<Departure>,
}

impl DepartureBoard {
    /// Records for the requested traffic category, in source order.
    pub fn departures(&self, traffic_type: TrafficType) -> &[Departure] {
        match traffic_type {
            TrafficType::Bus => &self.buses,
            TrafficType::Metro => &self.metros,
            TrafficType::Train => &self.trains,
        }
    }
}

/// Top-level departure fetch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartureResponse {
    #[serde(rename = "ResponseData", default)]
    pub response_data: DepartureBoard,
}

/// One site lookup result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    /// The API has returned this both as a JSON string and as a number.
    #[serde(deserialize_with = "string_from_string_or_number")]
    pub site_id: String,
    pub name: String,
}

/// Top-level site lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteLookupResponse {
    #[serde(rename = "ResponseData", default)]
    pub response_data: Vec<Site>,
}

fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// HTTP client for the SL APIs.
#[derive(Debug, Clone)]
pub struct SlClient {
    client: Client,
    endpoint: String,
    site_api_key: String,
    departure_api_key: String,
}

impl SlClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SlClientBuilder {
        SlClientBuilder::default()
    }

    /// Look up a site by id and return its display name.
    ///
    /// The lookup must produce exactly one result whose `SiteId` matches the
    /// requested id; zero, multiple, or mismatched results are all an
    /// invalid site id. The returned name has runs of whitespace collapsed.
    pub async fn fetch_site(&self, site_id: u32) -> Result<String, CheckError> {
        let url = format!(
            "{}/typeahead.json?key={}&searchstring={}",
            self.endpoint, self.site_api_key, site_id
        );
        debug!(site_id, "fetching site lookup");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CheckError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let lookup: SiteLookupResponse = response
            .json()
            .await
            .map_err(|e| CheckError::Decode(e.to_string()))?;

        validate_site(&lookup, site_id)
    }

    /// Fetch the departure board for a site over the given time window
    /// (in minutes).
    pub async fn fetch_departures(
        &self,
        site_id: u32,
        time_window: u32,
    ) -> Result<DepartureResponse, CheckError> {
        let url = format!(
            "{}/realtimedeparturesV4.json?key={}&siteid={}&timewindow={}",
            self.endpoint, self.departure_api_key, site_id, time_window
        );
        debug!(site_id, time_window, "fetching departures");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CheckError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CheckError::Decode(e.to_string()))
    }
}

/// Check the lookup response against the requested site id and extract the
/// normalized site name.
pub fn validate_site(lookup: &SiteLookupResponse, site_id: u32) -> Result<String, CheckError> {
    let [site] = lookup.response_data.as_slice() else {
        return Err(CheckError::InvalidSiteId(site_id));
    };

    if site.site_id != site_id.to_string() {
        debug!(returned = %site.site_id, "lookup result does not match requested site id");
        return Err(CheckError::InvalidSiteId(site_id));
    }

    Ok(site.name.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Builder for [`SlClient`].
#[derive(Debug, Default)]
pub struct SlClientBuilder {
    endpoint: Option<String>,
    site_api_key: Option<String>,
    departure_api_key: Option<String>,
}

impl SlClientBuilder {
    /// Set the API base URL (default: `https://api.sl.se/api2`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the key for the typeahead (site lookup) API.
    pub fn site_api_key(mut self, key: impl Into<String>) -> Self {
        self.site_api_key = Some(key.into());
        self
    }

    /// Set the key for the real-time departures API.
    pub fn departure_api_key(mut self, key: impl Into<String>) -> Self {
        self.departure_api_key = Some(key.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> SlClient {
        SlClient {
            client: Client::new(),
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            site_api_key: self.site_api_key.unwrap_or_default(),
            departure_api_key: self.departure_api_key.unwrap_or_default(),
        }
    }
}
