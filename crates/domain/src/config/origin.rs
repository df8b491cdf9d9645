use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream origin settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OriginConfig {
    /// Base URL every cache key is joined onto. Must end with `/` so the
    /// last path segment is not replaced by the join.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for one origin round trip, body included (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl OriginConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://ajax.googleapis.com/ajax/libs/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("ferrous-cdn/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
