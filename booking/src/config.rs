//! Configuration for the booking services.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset variables fall back to the default; set but malformed ones are
//! errors rather than silently ignored.

use crate::gateway::{FailureRates, GatewaySettings};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but does not parse
    #[error("{name}: cannot parse '{value}'")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// A probability outside `0.0..=1.0`
    #[error("{name}: {value} is not a probability between 0 and 1")]
    NotAProbability {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Mock booking service behaviour
    pub gateway: GatewaySettings,
    /// Simulated latency of the player search
    pub search_latency: Duration,
    /// How long to wait for in-flight effects on shutdown
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewaySettings::default(),
            search_latency: Duration::from_millis(1500),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a present value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let reader = Reader { lookup: &lookup };

        let failure_rates = FailureRates {
            court: reader.probability(
                "COURTSIDE_COURT_FAILURE_RATE",
                defaults.gateway.failure_rates.court,
            )?,
            training: reader.probability(
                "COURTSIDE_TRAINING_FAILURE_RATE",
                defaults.gateway.failure_rates.training,
            )?,
            matches: reader.probability(
                "COURTSIDE_MATCH_FAILURE_RATE",
                defaults.gateway.failure_rates.matches,
            )?,
        };

        Ok(Self {
            gateway: GatewaySettings {
                slot_latency: reader.millis("COURTSIDE_SLOT_LATENCY_MS", defaults.gateway.slot_latency)?,
                submit_latency: reader
                    .millis("COURTSIDE_SUBMIT_LATENCY_MS", defaults.gateway.submit_latency)?,
                cancel_latency: reader
                    .millis("COURTSIDE_CANCEL_LATENCY_MS", defaults.gateway.cancel_latency)?,
                availability_rate: reader.probability(
                    "COURTSIDE_AVAILABILITY_RATE",
                    defaults.gateway.availability_rate,
                )?,
                failure_rates,
                seed: reader.parse::<u64>("COURTSIDE_SEED")?,
            },
            search_latency: reader.millis("COURTSIDE_SEARCH_LATENCY_MS", defaults.search_latency)?,
            shutdown_timeout: reader
                .parse::<u64>("COURTSIDE_SHUTDOWN_TIMEOUT_SECS")?
                .map_or(defaults.shutdown_timeout, Duration::from_secs),
        })
    }
}

struct Reader<'a, F> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> Reader<'_, F> {
    fn parse<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        let Some(raw) = (self.lookup)(name) else {
            return Ok(None);
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw })
    }

    fn millis(&self, name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
        Ok(self
            .parse::<u64>(name)?
            .map_or(default, Duration::from_millis))
    }

    fn probability(&self, name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match self.parse::<f64>(name)? {
            None => Ok(default),
            Some(rate) if (0.0..=1.0).contains(&rate) => Ok(rate),
            Some(rate) => Err(ConfigError::NotAProbability {
                name,
                value: rate.to_string(),
            }),
        }
    }
}
