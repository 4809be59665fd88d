//! Container configuration.
//!
//! Settings can be set in code, read from environment variables, or (with the
//! `config` feature) deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::internal::MAX_DEPTH;

/// Environment variable prefix used by [`ContainerConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "FERROUS_IOC";

/// Tunables for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, ContainerConfig};
///
/// let config = ContainerConfig::new()
///     .with_max_depth(64)
///     .with_evict_on_rebind(false);
/// let container = Container::with_config(config.clone()).unwrap();
/// assert_eq!(container.config(), &config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Longest resolution chain before `DepthExceeded` is raised
    pub max_depth: usize,
    /// Drop a cached singleton when its identifier is bound again
    pub evict_on_rebind: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            evict_on_rebind: true,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_evict_on_rebind(mut self, evict: bool) -> Self {
        self.evict_on_rebind = evict;
        self
    }

    /// Reads `FERROUS_IOC_MAX_DEPTH` and `FERROUS_IOC_EVICT_ON_REBIND`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> DiResult<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable prefix.
    pub fn from_env_with_prefix(prefix: &str) -> DiResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_var(prefix, "MAX_DEPTH") {
            config.max_depth = raw.trim().parse::<usize>().map_err(|_| {
                DiError::Config(format!("{}_MAX_DEPTH must be a positive integer, got {:?}", prefix.to_uppercase(), raw))
            })?;
        }

        if let Some(raw) = read_var(prefix, "EVICT_ON_REBIND") {
            config.evict_on_rebind = parse_bool(&raw).ok_or_else(|| {
                DiError::Config(format!("{}_EVICT_ON_REBIND must be a boolean, got {:?}", prefix.to_uppercase(), raw))
            })?;
        }

        config.validate()
    }

    /// Parses a JSON object; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DiError::Config(format!("invalid container configuration: {}", e)))?;
        config.validate()
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(self) -> DiResult<Self> {
        if self.max_depth == 0 {
            return Err(DiError::Config("max_depth must be greater than zero".to_string()));
        }
        Ok(self)
    }
}

fn read_var(prefix: &str, name: &str) -> Option<String> {
    env::var(format!("{}_{}", prefix.to_uppercase(), name)).ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
