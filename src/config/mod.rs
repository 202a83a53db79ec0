//! Environment-backed configuration.
//!
//! The record store URL and the model artifact are required; everything else
//! has a default and can be overridden with `RANKER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RECORD_INTERVAL_MS, DEFAULT_WRITE_INTERVAL_MS,
};
use crate::embedding::{VectorFormat, VectorSpaceConfig};

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RANKER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the record store (e.g. `https://host/api:v1`).
    pub api_base_url: String,

    /// Path to the persisted word-vector artifact.
    pub model_path: PathBuf,

    /// Artifact format. `None` infers it from the file extension.
    pub model_format: Option<VectorFormat>,

    /// Job to score. `None` lists jobs instead of running a pass.
    pub job_id: Option<i64>,

    /// Minimum spacing between store write cycles. Default: 2s.
    pub write_interval: Duration,

    /// Minimum spacing between records of a pass. Default: 1s.
    pub record_interval: Duration,

    /// Per-request HTTP timeout. Default: 30s.
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            model_path: PathBuf::new(),
            model_format: None,
            job_id: None,
            write_interval: Duration::from_millis(DEFAULT_WRITE_INTERVAL_MS),
            record_interval: Duration::from_millis(DEFAULT_RECORD_INTERVAL_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    const ENV_API_BASE_URL: &'static str = "RANKER_API_BASE_URL";
    const ENV_MODEL_PATH: &'static str = "RANKER_MODEL_PATH";
    const ENV_MODEL_FORMAT: &'static str = "RANKER_MODEL_FORMAT";
    const ENV_JOB_ID: &'static str = "RANKER_JOB_ID";
    const ENV_WRITE_INTERVAL_MS: &'static str = "RANKER_WRITE_INTERVAL_MS";
    const ENV_RECORD_INTERVAL_MS: &'static str = "RANKER_RECORD_INTERVAL_MS";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "RANKER_HTTP_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = Self::required_string(Self::ENV_API_BASE_URL)?
            .trim_end_matches('/')
            .to_string();
        let model_path = PathBuf::from(Self::required_string(Self::ENV_MODEL_PATH)?);
        let model_format = Self::parse_format_from_env()?;
        let job_id = Self::parse_optional_i64_from_env(Self::ENV_JOB_ID)?;

        let write_interval = Self::parse_u64_from_env(Self::ENV_WRITE_INTERVAL_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.write_interval);
        let record_interval = Self::parse_u64_from_env(Self::ENV_RECORD_INTERVAL_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.record_interval);
        let http_timeout = Self::parse_u64_from_env(Self::ENV_HTTP_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Ok(Self {
            api_base_url,
            model_path,
            model_format,
            job_id,
            write_interval,
            record_interval,
            http_timeout,
        })
    }

    /// Validates the URL shape and the artifact path (does not load the model).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.api_base_url.clone(),
            });
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.write_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: Self::ENV_WRITE_INTERVAL_MS,
            });
        }
        if self.record_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: Self::ENV_RECORD_INTERVAL_MS,
            });
        }

        if !self.model_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.model_path.clone(),
            });
        }
        if !self.model_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.model_path.clone(),
            });
        }

        Ok(())
    }

    /// Builds the vector space loader settings for this configuration.
    pub fn vector_space(&self) -> VectorSpaceConfig {
        let config = VectorSpaceConfig::new(self.model_path.clone());
        match self.model_format {
            Some(format) => config.format(format),
            None => config,
        }
    }

    fn required_string(var_name: &'static str) -> Result<String, ConfigError> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn parse_format_from_env() -> Result<Option<VectorFormat>, ConfigError> {
        match env::var(Self::ENV_MODEL_FORMAT) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::UnknownVectorFormat { value }),
            _ => Ok(None),
        }
    }

    fn parse_optional_i64_from_env(var_name: &'static str) -> Result<Option<i64>, ConfigError> {
        match env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            _ => Ok(None),
        }
    }

    fn parse_u64_from_env(var_name: &'static str) -> Result<Option<u64>, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(None),
        }
    }
}
