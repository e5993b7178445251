//! Feed settings: what to search for and where.
//!
//! Settings are plain values. They come from defaults, then an optional YAML
//! file, then command-line flags (see `cli.rs` in the binary), and are turned
//! into a fresh [`FetchRequest`] for every fetch cycle.
//!
//! ```yaml
//! base_url: https://content.guardianapis.com/search
//! subject: technology
//! order_by: relevance
//! api_key: test
//! ```

use crate::models::{FetchRequest, OrderBy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Guardian content search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search";
/// Query used when none is configured.
pub const DEFAULT_SUBJECT: &str = "technology";
/// The Guardian's public developer key.
pub const DEFAULT_API_KEY: &str = "test";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// User-editable query settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedSettings {
    pub base_url: String,
    pub subject: String,
    pub order_by: OrderBy,
    pub api_key: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            order_by: OrderBy::default(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl FeedSettings {
    /// Parse settings from YAML text. `origin` only labels errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Read settings from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: origin.clone(),
                source,
            })?;
        let settings = Self::from_yaml_str(&yaml, &origin)?;
        info!(subject = %settings.subject, order_by = %settings.order_by, "Loaded settings");
        Ok(settings)
    }

    /// The request for one fetch cycle.
    pub fn to_request(&self) -> FetchRequest {
        FetchRequest {
            base_url: self.base_url.clone(),
            subject: self.subject.clone(),
            order_by: self.order_by,
            api_key: self.api_key.clone(),
        }
    }
}
