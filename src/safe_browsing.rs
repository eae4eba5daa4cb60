use crate::errors::{AppError, AppResult};
use crate::lookup::ThreatLookup;
use crate::persistence::{connect, find_matches, persist_matches};
use crate::threat::{PlatformType, ThreatDescriptor, ThreatEntryType, ThreatMatch, ThreatType};
use chrono::{Duration, Utc};
use reqwest::blocking::Client;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_HOST: &str = "https://safebrowsing.googleapis.com";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const CLIENT_ID: &str = "sblookup";
const DEFAULT_CACHE_DURATION_SECONDS: i64 = 300;
const REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub api_host: String,
    pub db_path: Option<PathBuf>,
}

pub struct SafeBrowser {
    api_key: String,
    cache: Option<Connection>,
    client: Client,
    endpoint: Url,
}


impl SafeBrowser {
    pub fn new(config: Config) -> AppResult<Self> {
        if config.api_key.is_empty() || config.api_key.chars().any(char::is_whitespace) {
            return Err(AppError::InvalidApiKey);
        }

        let endpoint = Url::parse(&format!(
            "{}/v4/threatMatches:find",
            config.api_host.trim_end_matches('/')
        ))?;

        let cache = match config.db_path {
            Some(path) => Some(connect(&path)?),
            None => None,
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        debug!(endpoint = %endpoint, persistent = cache.is_some(), "Safe Browsing client ready");

        Ok(Self {
            api_key: config.api_key,
            cache,
            client,
            endpoint,
        })
    }

    fn cached_matches(&self, url: &str) -> Option<Vec<ThreatMatch>> {
        let conn = self.cache.as_ref()?;

        match find_matches(conn, url, Utc::now()) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Unable to read cached threat matches");
                None
            }
        }
    }

    fn cache_matches(&self, url: &str, matches: &[ThreatMatch], cache_duration: Duration) {
        if let Some(conn) = &self.cache {
            let expires_at = match Utc::now().checked_add_signed(cache_duration) {
                Some(expires_at) => expires_at,
                None => {
                    warn!(cache_duration = %cache_duration, "Cache duration out of range, not caching");
                    return;
                }
            };

            if let Err(e) = persist_matches(conn, url, matches, expires_at) {
                warn!(error = %e, "Unable to cache threat matches");
            }
        }
    }

    fn find_threat_matches(&self, urls: &[&str]) -> AppResult<FindThreatMatchesResponse> {
        debug!(urls = urls.len(), "Querying Safe Browsing");

        let response = self.client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&FindThreatMatchesRequest::new(urls))
            .send()?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();

            return Err(AppError::LookupStatus {
                status: status.as_u16(),
                body: body.split_whitespace().collect::<Vec<&str>>().join(" "),
            });
        }

        Ok(serde_json::from_str(&response.text()?)?)
    }
}

impl ThreatLookup for SafeBrowser {
    fn lookup_urls(&self, urls: &[String]) -> AppResult<Vec<Vec<ThreatMatch>>> {
        let mut results: Vec<Vec<ThreatMatch>> = vec![vec![]; urls.len()];
        let mut pending: Vec<usize> = vec![];

        for (index, url) in urls.iter().enumerate() {
            match self.cached_matches(url) {
                Some(matches) => {
                    debug!(url = %url, "Safe Browsing cache hit");
                    results[index] = matches;
                },
                None => pending.push(index),
            }
        }

        if pending.is_empty() {
            return Ok(results);
        }

        let mut requested: Vec<&str> = vec![];

        for index in &pending {
            if !requested.contains(&urls[*index].as_str()) {
                requested.push(&urls[*index]);
            }
        }

        let response = self.find_threat_matches(&requested)?;
        let cache_duration = response.shortest_cache_duration();

        assign_matches(urls, &pending, response, &mut results);

        for index in pending {
            if !results[index].is_empty() {
                self.cache_matches(&urls[index], &results[index], cache_duration);
            }
        }

        Ok(results)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindThreatMatchesRequest<'a> {
    client: ClientInfo,
    threat_info: ThreatInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo {
    client_id: &'static str,
    client_version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: Vec<ThreatType>,
    platform_types: Vec<PlatformType>,
    threat_entry_types: Vec<ThreatEntryType>,
    threat_entries: Vec<ThreatEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}


impl<'a> FindThreatMatchesRequest<'a> {
    fn new(urls: &[&'a str]) -> Self {
        Self {
            client: ClientInfo {
                client_id: CLIENT_ID,
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: vec![
                    ThreatType::Malware,
                    ThreatType::SocialEngineering,
                    ThreatType::UnwantedSoftware,
                    ThreatType::PotentiallyHarmfulApplication,
                ],
                platform_types: vec![PlatformType::AnyPlatform],
                threat_entry_types: vec![ThreatEntryType::UrlExpression],
                threat_entries: urls.iter().map(|url| ThreatEntry { url: *url }).collect(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FindThreatMatchesResponse {
    #[serde(default)]
    matches: Vec<ApiThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiThreatMatch {
    threat_type: ThreatType,
    platform_type: PlatformType,
    threat_entry_type: ThreatEntryType,
    threat: ApiThreat,
    cache_duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiThreat {
    url: String,
}


impl FindThreatMatchesResponse {
    fn shortest_cache_duration(&self) -> Duration {
        self.matches
            .iter()
            .map(|threat_match| {
                threat_match.cache_duration
                    .as_deref()
                    .and_then(parse_duration)
                    .unwrap_or_else(|| Duration::seconds(DEFAULT_CACHE_DURATION_SECONDS))
            })
            .min()
            .unwrap_or_else(|| Duration::seconds(DEFAULT_CACHE_DURATION_SECONDS))
    }
}

fn parse_duration(duration: &str) -> Option<Duration> {
    let seconds: f64 = duration.strip_suffix('s')?.parse().ok()?;
    let milliseconds = seconds * 1000.0;

    if milliseconds.is_finite() && milliseconds >= 0.0 && milliseconds < i64::MAX as f64 {
        Some(Duration::milliseconds(milliseconds as i64))
    } else {
        None
    }
}


fn assign_matches(
    urls: &[String],
    pending: &[usize],
    response: FindThreatMatchesResponse,
    results: &mut [Vec<ThreatMatch>]
) {
    for api_match in response.matches {
        let descriptor = ThreatDescriptor {
            threat_type: api_match.threat_type,
            platform_type: api_match.platform_type,
            threat_entry_type: api_match.threat_entry_type,
        };

        let positions: Vec<usize> = pending
            .iter()
            .copied()
            .filter(|index| urls[*index] == api_match.threat.url)
            .collect();

        if positions.is_empty() {
            debug!(url = %api_match.threat.url, "Ignoring match for a URL that was not requested");
        }

        for index in positions {
            results[index].push(ThreatMatch::new(&urls[index], descriptor.clone()));
        }
    }
}
