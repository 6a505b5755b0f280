//! Console configuration
//!
//! Read from the environment (after `.env` is loaded); command-line flags
//! override individual values.

use std::path::PathBuf;

use roster_client::ClientConfig;
use roster_client::config::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_OPERATOR: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend base URL (ROSTER_API_URL)
    pub api_url: String,
    /// Bearer token (ROSTER_TOKEN)
    pub token: Option<String>,
    /// Request timeout (ROSTER_TIMEOUT_SECS)
    pub timeout_secs: u64,
    /// Account whose PIN confirms actions (ROSTER_OPERATOR)
    pub operator: String,
    /// Daily log files go here when set (ROSTER_LOG_DIR)
    pub log_dir: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_url: var("ROSTER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            token: var("ROSTER_TOKEN"),
            timeout_secs: var("ROSTER_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            operator: var("ROSTER_OPERATOR").unwrap_or_else(|| DEFAULT_OPERATOR.into()),
            log_dir: var("ROSTER_LOG_DIR").map(PathBuf::from),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api_url)
            .with_timeout(self.timeout_secs)
            .with_operator(&self.operator);
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        config
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
