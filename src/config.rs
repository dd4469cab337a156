//! Configuration Module
//!
//! Construction-time cache configuration with eager, all-or-nothing
//! validation. A cache is never created from an invalid configuration.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Capacity used when `max_size` is not set explicitly.
pub const DEFAULT_MAX_SIZE: usize = 100;

// == Config ==
/// Validated cache configuration.
///
/// Obtained from [`Config::builder`] (or [`Config::default`] for the stock
/// settings: capacity 100, no expiration). Both fields are fixed for the
/// lifetime of the cache built from them.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    max_size: usize,
    ttl: Option<Duration>,
}

impl Config {
    /// Starts a builder with the default settings.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Maximum number of entries the cache may hold.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Expiry window applied on every touch, if expiration is enabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl: None,
        }
    }
}

// == Builder ==
/// Collects raw option values and validates them in [`build`].
///
/// [`build`]: Builder::build
#[derive(Debug, Default)]
pub struct Builder {
    max_size: Option<usize>,
    ttl: Option<TtlSpec>,
}

/// Raw TTL input, kept unvalidated until `build`.
#[derive(Debug, Clone, Copy)]
enum TtlSpec {
    Seconds(f64),
    Exact(Duration),
}

impl Builder {
    /// Creates a builder with no options set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of entries, must be > 0. Defaults to 100.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Expiry window for entries. Must be non-zero.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(TtlSpec::Exact(ttl));
        self
    }

    /// Expiry window in seconds; fractional values are allowed.
    ///
    /// Non-finite input is rejected at `build` with the wrong-type error
    /// kind, non-positive input with the must-be-positive kind.
    pub fn ttl_secs(mut self, secs: f64) -> Self {
        self.ttl = Some(TtlSpec::Seconds(secs));
        self
    }

    /// Creates a builder pre-filled from environment variables.
    ///
    /// # Environment Variables
    /// - `TIMED_LRU_MAX_SIZE` - maximum cache entries
    /// - `TIMED_LRU_TTL` - expiry window in seconds (fractional allowed)
    ///
    /// Unset variables fall back to the defaults. Unlike values passed
    /// through the typed setters, env text can fail coercion: unparseable
    /// input maps to [`ConfigError::WrongType`], a parsed but non-positive
    /// magnitude to [`ConfigError::NotPositive`].
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Some(raw) = read_env("TIMED_LRU_MAX_SIZE", "max_size")? {
            let parsed: i64 = raw.parse().map_err(|_| ConfigError::WrongType {
                option: "max_size",
                expected: "an integer",
                given: raw.clone(),
            })?;
            if parsed <= 0 {
                return Err(ConfigError::NotPositive { option: "max_size" });
            }
            builder = builder.max_size(parsed as usize);
        }

        if let Some(raw) = read_env("TIMED_LRU_TTL", "ttl")? {
            let parsed: f64 = raw.parse().map_err(|_| ConfigError::WrongType {
                option: "ttl",
                expected: "a number of seconds",
                given: raw.clone(),
            })?;
            builder = builder.ttl_secs(parsed);
        }

        Ok(builder)
    }

    /// Validates all options and produces the final configuration.
    ///
    /// # Errors
    /// - [`ConfigError::NotPositive`] when `max_size` or the TTL is zero or
    ///   negative
    /// - [`ConfigError::WrongType`] when the TTL cannot be coerced into a
    ///   duration (non-finite seconds)
    pub fn build(self) -> Result<Config> {
        let max_size = self.max_size.unwrap_or(DEFAULT_MAX_SIZE);
        if max_size == 0 {
            return Err(ConfigError::NotPositive { option: "max_size" });
        }

        let ttl = match self.ttl {
            None => None,
            Some(TtlSpec::Exact(duration)) => {
                if duration.is_zero() {
                    return Err(ConfigError::NotPositive { option: "ttl" });
                }
                Some(duration)
            }
            Some(TtlSpec::Seconds(secs)) => Some(coerce_secs(secs)?),
        };

        Ok(Config { max_size, ttl })
    }
}

// == Helpers ==

fn coerce_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() {
        return Err(ConfigError::WrongType {
            option: "ttl",
            expected: "a finite number of seconds",
            given: secs.to_string(),
        });
    }
    if secs <= 0.0 {
        return Err(ConfigError::NotPositive { option: "ttl" });
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::WrongType {
        option: "ttl",
        expected: "a representable number of seconds",
        given: secs.to_string(),
    })
}

fn read_env(var: &str, option: &'static str) -> Result<Option<String>> {
    match env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::WrongType {
            option,
            expected: "a UTF-8 string",
            given: "<non-unicode>".to_string(),
        }),
    }
}
