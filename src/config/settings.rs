//! Settings structures for censys-asm-search configuration

use crate::error::{Api, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default Censys Search API location
pub const DEFAULT_SEARCH_URL: &str = "https://censys.io/api/v1";

/// Default Censys ASM API location
pub const DEFAULT_ASM_URL: &str = "https://app.censys.io/api/v1";

/// Hosts per search query. Larger batches hit upstream query length limits,
/// smaller ones multiply the number of API calls.
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Longest accepted per-request timeout, in seconds
pub const MAX_REQUEST_TIMEOUT: f64 = 3600.0;

/// Main settings structure, loadable from YAML and the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchApiSettings,
    pub asm: AsmApiSettings,
    pub outgoing: OutgoingSettings,
    /// Number of hosts combined into one search query
    pub batch_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search: SearchApiSettings::default(),
            asm: AsmApiSettings::default(),
            outgoing: OutgoingSettings::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with the CENSYS_* environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge values from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CENSYS_API_UID") {
            self.search.uid = Some(val);
        }
        if let Some(val) = lookup("CENSYS_API_SECRET") {
            self.search.secret = Some(val);
        }
        if let Some(val) = lookup("CENSYS_API_ALT_URL") {
            self.search.url = val;
        }
        if let Some(val) = lookup("CENSYS_ASM_API_KEY") {
            self.asm.key = Some(val);
        }
        if let Some(val) = lookup("CENSYS_ASM_API_ALT_URL") {
            self.asm.url = val;
        }
    }

    /// Check the settings for values that cannot work at all
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        let timeout = self.outgoing.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 || timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(format!(
                "outgoing.request_timeout must be between 0 and {} seconds, got {}",
                MAX_REQUEST_TIMEOUT, timeout
            )));
        }
        url::Url::parse(&self.search.url)?;
        url::Url::parse(&self.asm.url)?;
        Ok(())
    }

    /// Extract the credentials, failing with every missing variable named
    pub fn credentials(&self) -> Result<Credentials> {
        let mut missing = Vec::new();

        let uid = present(&self.search.uid);
        let secret = present(&self.search.secret);
        let asm_key = present(&self.asm.key);

        if uid.is_none() {
            missing.push("CENSYS_API_UID");
        }
        if secret.is_none() {
            missing.push("CENSYS_API_SECRET");
        }
        if asm_key.is_none() {
            missing.push("CENSYS_ASM_API_KEY");
        }

        match (uid, secret, asm_key) {
            (Some(uid), Some(secret), Some(asm_key)) => Ok(Credentials {
                search_uid: uid.to_string(),
                search_secret: secret.to_string(),
                asm_key: asm_key.to_string(),
            }),
            _ => Err(Error::MissingCredentials(missing)),
        }
    }

    /// APIs whose base URL differs from the default location
    pub fn overridden_endpoints(&self) -> Vec<(Api, &str)> {
        let mut overridden = Vec::new();
        if self.search.url != DEFAULT_SEARCH_URL {
            overridden.push((Api::Search, self.search.url.as_str()));
        }
        if self.asm.url != DEFAULT_ASM_URL {
            overridden.push((Api::Asm, self.asm.url.as_str()));
        }
        overridden
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Censys Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchApiSettings {
    /// Base URL of the search API
    pub url: String,
    /// API ID used as the basic auth user
    pub uid: Option<String>,
    /// API secret used as the basic auth password
    pub secret: Option<String>,
}

impl Default for SearchApiSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            uid: None,
            secret: None,
        }
    }
}

/// Censys ASM API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmApiSettings {
    /// Base URL of the ASM API
    pub url: String,
    /// Value of the Censys-Api-Key header
    pub key: Option<String>,
}

impl Default for AsmApiSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ASM_URL.to_string(),
            key: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Validated API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub search_uid: String,
    pub search_secret: String,
    pub asm_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("search_uid", &self.search_uid)
            .field("search_secret", &mask(&self.search_secret))
            .field("asm_key", &mask(&self.asm_key))
            .finish()
    }
}

/// Hide all but the last four characters of a secret
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
