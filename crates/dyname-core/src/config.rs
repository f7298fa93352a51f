//! Configuration types for dyname
//!
//! The configuration is a YAML file, by default `/etc/dyname.yaml`:
//!
//! ```yaml
//! username: jdoe
//! apikey: 0123456789abcdef
//! ttlToUpdate: 301
//! testMode: false
//! dryRun: false
//! ipLookup:
//!   v4Url: https://v4.ident.me
//!   v6Url: https://v6.ident.me
//! ```
//!
//! `ttlToUpdate` is a sentinel, not a real time-to-live preference: every record
//! whose TTL equals it is rewritten to the current address. Pick a value no other
//! record on the account uses.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/dyname.yaml";

/// Main dyname configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynameConfig {
    /// Registrar account username
    pub username: String,

    /// Registrar API key, used as the basic-auth password
    /// ⚠️ NEVER log this value
    #[serde(rename = "apikey", alias = "apiKey")]
    pub api_key: String,

    /// Records with exactly this TTL are reconciled
    pub ttl_to_update: u32,

    /// Use the registrar's sandbox host instead of production
    #[serde(default)]
    pub test_mode: bool,

    /// Perform all reads but skip record updates
    #[serde(default)]
    pub dry_run: bool,

    /// Address lookup services
    #[serde(default)]
    pub ip_lookup: IpLookupConfig,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for DynameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynameConfig")
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .field("ttl_to_update", &self.ttl_to_update)
            .field("test_mode", &self.test_mode)
            .field("dry_run", &self.dry_run)
            .field("ip_lookup", &self.ip_lookup)
            .finish()
    }
}

impl DynameConfig {
    /// Create a configuration with default lookup services
    pub fn new(username: impl Into<String>, api_key: impl Into<String>, ttl_to_update: u32) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            ttl_to_update,
            test_mode: false,
            dry_run: false,
            ip_lookup: IpLookupConfig::default(),
        }
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`]
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::from_file(path.unwrap_or(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::config("username cannot be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::config("apikey cannot be empty"));
        }

        self.ip_lookup.validate()
    }
}

/// Address lookup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpLookupConfig {
    /// Service returning the caller's IPv4 address as plain text
    #[serde(default = "default_v4_url")]
    pub v4_url: String,

    /// Service returning the caller's IPv6 address as plain text
    #[serde(default = "default_v6_url")]
    pub v6_url: String,
}

impl IpLookupConfig {
    /// Validate the lookup URLs
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("ipLookup.v4Url", &self.v4_url), ("ipLookup.v6Url", &self.v6_url)] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(Error::config(format!(
                    "{} must use HTTP or HTTPS scheme. Got: {:?}",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

impl Default for IpLookupConfig {
    fn default() -> Self {
        Self {
            v4_url: default_v4_url(),
            v6_url: default_v6_url(),
        }
    }
}

fn default_v4_url() -> String {
    "https://v4.ident.me".to_string()
}

fn default_v6_url() -> String {
    "https://v6.ident.me".to_string()
}
