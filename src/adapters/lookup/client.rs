//! football-data.org Client - Rate-limited Match Data Lookups
//!
//! Wraps reqwest with a governor rate limiter and bounded retries for
//! head-to-head and league draw-rate lookups. Implements the
//! `MatchDataSource` port.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::LookupConfig;
use crate::ports::match_data::{FixtureRef, MatchDataSource};

use super::types::MatchList;

/// Lookup failures.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("no API key configured (set {0})")]
  MissingApiKey(String),

  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("API error {status}: {body}")]
  Status { status: u16, body: String },

  #[error("gave up after {0} attempts")]
  RetriesExhausted(u32),
}

/// Configuration for the football-data.org client.
#[derive(Debug, Clone)]
pub struct FootballDataConfig {
  /// API base URL.
  pub base_url: String,
  /// `X-Auth-Token` value. Passed in explicitly, never read here.
  pub api_key: Option<String>,
  /// Name of the variable the key came from, for error messages.
  pub api_key_env: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
  /// Request budget per minute.
  pub requests_per_minute: u32,
}

impl FootballDataConfig {
  pub fn from_lookup(config: &LookupConfig, api_key: Option<String>) -> Self {
    Self {
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key,
      api_key_env: config.api_key_env.clone(),
      timeout: Duration::from_secs(config.timeout_seconds),
      max_retries: config.max_retries,
      retry_base_delay: Duration::from_millis(500),
      requests_per_minute: config.requests_per_minute,
    }
  }

  /// Backoff before retry `attempt` (1-based): base, 2x base, 4x base...
  pub fn retry_delay(&self, attempt: u32) -> Duration {
    self
      .retry_base_delay
      .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
  }
}

/// Rate-limited football-data.org client.
pub struct FootballDataClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: FootballDataConfig,
  /// Per-minute request budget.
  limiter: DefaultDirectRateLimiter,
  /// League draw rates already fetched, by competition code.
  league_rates: RwLock<HashMap<String, Option<f64>>>,
}

impl FootballDataClient {
  /// Create a new client.
  pub fn new(config: FootballDataConfig) -> Result<Self, LookupError> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(2)
      .build()?;

    let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
    let limiter = RateLimiter::direct(Quota::per_minute(per_minute));

    Ok(Self {
      http,
      config,
      limiter,
      league_rates: RwLock::new(HashMap::new()),
    })
  }

  /// GET a JSON document with rate limiting and retries.
  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T, LookupError> {
    let api_key = self
      .config
      .api_key
      .as_deref()
      .ok_or_else(|| LookupError::MissingApiKey(self.config.api_key_env.clone()))?;
    let url = format!("{}{}", self.config.base_url, path);

    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_delay(attempt);
        debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying lookup");
        sleep(delay).await;
      }

      self.limiter.until_ready().await;

      let request = self
        .http
        .get(&url)
        .header("X-Auth-Token", api_key)
        .query(query);

      match request.send().await {
        Ok(response) => match response.status() {
          StatusCode::OK => return Ok(response.json::<T>().await?),
          StatusCode::TOO_MANY_REQUESTS => {
            warn!(path, "Rate limited by football-data.org, backing off");
            sleep(Duration::from_secs(6)).await;
            last_error = Some(LookupError::Status {
              status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
              body: "rate limited".to_string(),
            });
          }
          status if status.is_server_error() => {
            warn!(status = %status, path, "Server error, retrying");
            last_error = Some(LookupError::Status {
              status: status.as_u16(),
              body: String::new(),
            });
          }
          status => {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
              status: status.as_u16(),
              body,
            });
          }
        },
        Err(e) if e.is_timeout() || e.is_connect() => {
          warn!(error = %e, attempt, "Lookup request failed");
          last_error = Some(e.into());
        }
        Err(e) => return Err(e.into()),
      }
    }

    Err(last_error.unwrap_or(LookupError::RetriesExhausted(self.config.max_retries + 1)))
  }
}

#[async_trait]
impl MatchDataSource for FootballDataClient {
  #[instrument(skip(self, fixture), fields(match_id = ?fixture.match_id))]
  async fn head_to_head_draws(
    &self,
    fixture: &FixtureRef,
    window: u32,
  ) -> anyhow::Result<Option<u32>> {
    let Some(match_id) = fixture.match_id else {
      return Ok(None);
    };

    let list: MatchList = self
      .get_json(
        &format!("/v4/matches/{match_id}/head2head"),
        &[("limit", window.to_string())],
      )
      .await?;

    let draws = list.finished_draws();
    info!(draws = ?draws, meetings = list.matches.len(), "Head-to-head fetched");
    Ok(draws)
  }

  #[instrument(skip(self, fixture), fields(competition = ?fixture.competition))]
  async fn league_draw_rate(&self, fixture: &FixtureRef) -> anyhow::Result<Option<f64>> {
    let Some(code) = fixture.competition.as_deref() else {
      return Ok(None);
    };

    if let Some(cached) = self.league_rates.read().await.get(code) {
      return Ok(*cached);
    }

    let list: MatchList = self
      .get_json(
        &format!("/v4/competitions/{code}/matches"),
        &[("status", "FINISHED".to_string())],
      )
      .await?;

    let rate = list.draw_rate_pct();
    info!(rate = ?rate, matches = list.matches.len(), "League draw rate fetched");
    self.league_rates.write().await.insert(code.to_string(), rate);
    Ok(rate)
  }

  async fn is_healthy(&self) -> bool {
    self
      .get_json::<serde_json::Value>("/v4/competitions", &[])
      .await
      .is_ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(api_key: Option<&str>) -> FootballDataConfig {
    FootballDataConfig::from_lookup(&LookupConfig::default(), api_key.map(str::to_string))
  }

  #[test]
  fn test_config_from_lookup() {
    let lookup = LookupConfig {
      base_url: "https://example.test/".to_string(),
      ..LookupConfig::default()
    };
    let cfg = FootballDataConfig::from_lookup(&lookup, None);
    assert_eq!(cfg.base_url, "https://example.test");
    assert_eq!(cfg.requests_per_minute, 10);
    assert_eq!(cfg.api_key_env, "FOOTBALL_DATA_API_KEY");
  }

  #[test]
  fn test_retry_delay_doubles_without_overflow() {
    let cfg = config(None);
    assert_eq!(cfg.retry_delay(1), Duration::from_millis(500));
    assert_eq!(cfg.retry_delay(2), Duration::from_millis(1000));
    assert_eq!(cfg.retry_delay(4), Duration::from_millis(4000));
    assert!(cfg.retry_delay(33) > cfg.retry_delay(32));
    assert_eq!(cfg.retry_delay(40), cfg.retry_delay(33));
  }

  #[tokio::test]
  async fn test_missing_key_fails_without_network() {
    let client = FootballDataClient::new(config(None)).unwrap();
    let fixture = FixtureRef {
      match_id: Some(1),
      ..FixtureRef::default()
    };
    let err = client.head_to_head_draws(&fixture, 5).await.unwrap_err();
    assert!(err.to_string().contains("FOOTBALL_DATA_API_KEY"), "{err}");
  }

  #[tokio::test]
  async fn test_unidentified_fixture_is_no_data() {
    let client = FootballDataClient::new(config(Some("token"))).unwrap();
    let fixture = FixtureRef::default();
    assert_eq!(client.head_to_head_draws(&fixture, 5).await.unwrap(), None);
    assert_eq!(client.league_draw_rate(&fixture).await.unwrap(), None);
  }
}
