//! Configuration for the booking wizard.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::pricing::{DEFAULT_CHILD_DISCOUNT, DEFAULT_TEEN_DISCOUNT, PricingRules};
use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable for the teen discount
pub const TEEN_DISCOUNT_VAR: &str = "MARQUEE_TEEN_DISCOUNT";
/// Environment variable for the child discount
pub const CHILD_DISCOUNT_VAR: &str = "MARQUEE_CHILD_DISCOUNT";
/// Environment variable for the reservation timeout in seconds
pub const SUBMIT_TIMEOUT_VAR: &str = "MARQUEE_SUBMIT_TIMEOUT_SECS";

const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value {value:?} for {key}")]
    Invalid {
        /// Variable name
        key: String,
        /// Raw value
        value: String,
    },
}

/// Booking wizard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Ticket discounts
    pub pricing: PricingRules,
    /// How long to wait for the reservation service, in seconds
    pub submit_timeout_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            pricing: PricingRules::default(),
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults; use
    /// [`BookingConfig::try_from_env`] to surface bad values instead.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from environment variables, rejecting bad values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but cannot be parsed.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Lenient loading from an arbitrary variable source
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lenient = |key: &str, default: u64| {
            parse_var(&lookup, key, default).unwrap_or_else(|error| {
                tracing::warn!(%error, default, "Falling back to default");
                default
            })
        };

        Self {
            pricing: PricingRules::new(
                Money::new(lenient(TEEN_DISCOUNT_VAR, DEFAULT_TEEN_DISCOUNT.amount())),
                Money::new(lenient(CHILD_DISCOUNT_VAR, DEFAULT_CHILD_DISCOUNT.amount())),
            ),
            submit_timeout_secs: lenient(SUBMIT_TIMEOUT_VAR, DEFAULT_SUBMIT_TIMEOUT_SECS),
        }
    }

    /// Strict loading from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but cannot be parsed.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            pricing: PricingRules::new(
                Money::new(parse_var(&lookup, TEEN_DISCOUNT_VAR, DEFAULT_TEEN_DISCOUNT.amount())?),
                Money::new(parse_var(&lookup, CHILD_DISCOUNT_VAR, DEFAULT_CHILD_DISCOUNT.amount())?),
            ),
            submit_timeout_secs: parse_var(&lookup, SUBMIT_TIMEOUT_VAR, DEFAULT_SUBMIT_TIMEOUT_SECS)?,
        })
    }

    /// Reservation timeout as a `Duration`
    #[must_use]
    pub const fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = BookingConfig::try_from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.pricing.teen_discount, Money::new(2_000));
        assert_eq!(config.pricing.child_discount, Money::new(6_000));
        assert_eq!(config.submit_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = BookingConfig::try_from_lookup(lookup(&[
            (TEEN_DISCOUNT_VAR, "1500"),
            (CHILD_DISCOUNT_VAR, " 4000 "),
            (SUBMIT_TIMEOUT_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config.pricing.teen_discount, Money::new(1_500));
        assert_eq!(config.pricing.child_discount, Money::new(4_000));
        assert_eq!(config.submit_timeout_secs, 3);
    }

    #[test]
    fn strict_loading_rejects_garbage() {
        let error = BookingConfig::try_from_lookup(lookup(&[(CHILD_DISCOUNT_VAR, "-5")])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::Invalid {
                key: CHILD_DISCOUNT_VAR.to_string(),
                value: "-5".to_string(),
            }
        );
    }

    #[test]
    fn lenient_loading_falls_back() {
        let config = BookingConfig::from_lookup(lookup(&[(TEEN_DISCOUNT_VAR, "lots")]));
        assert_eq!(config.pricing.teen_discount, DEFAULT_TEEN_DISCOUNT);
    }
}
