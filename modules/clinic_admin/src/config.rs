use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::connectivity::ReconnectPolicy;

/// Configuration for the clinic_admin module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicAdminConfig {
    /// Base address of the remote clinic service, e.g. `https://host/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Simulated latency before every fallback store operation
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
    /// Seconds a degraded façade waits before trying the remote service again.
    /// `null` keeps it on the fallback store for the rest of the session.
    #[serde(default = "default_reconnect_after_secs")]
    pub reconnect_after_secs: Option<u64>,
    /// Start the fallback store with the demo records
    #[serde(default = "default_seed_fallback")]
    pub seed_fallback: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Session file, relative paths resolve against the home directory
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for ClinicAdminConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fallback_delay_ms: default_fallback_delay_ms(),
            reconnect_after_secs: default_reconnect_after_secs(),
            seed_fallback: default_seed_fallback(),
            page_size: default_page_size(),
            session_file: default_session_file(),
        }
    }
}

impl ClinicAdminConfig {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::from_secs(self.reconnect_after_secs)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_fallback_delay_ms() -> u64 {
    500
}

fn default_reconnect_after_secs() -> Option<u64> {
    Some(30)
}

fn default_seed_fallback() -> bool {
    true
}

fn default_page_size() -> usize {
    10
}

fn default_session_file() -> String {
    "session.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: ClinicAdminConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:3000/api");
        assert_eq!(cfg.fallback_delay(), Duration::from_millis(500));
        assert_eq!(
            cfg.reconnect_policy(),
            ReconnectPolicy::After(Duration::from_secs(30))
        );
        assert!(cfg.seed_fallback);
        assert_eq!(cfg.page_size, 10);
    }

    #[test]
    fn null_reconnect_means_never() {
        let cfg: ClinicAdminConfig =
            serde_json::from_value(json!({ "reconnect_after_secs": null })).unwrap();
        assert_eq!(cfg.reconnect_policy(), ReconnectPolicy::Never);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<ClinicAdminConfig, _> =
            serde_json::from_value(json!({ "base_uri": "http://x" }));
        assert!(res.is_err());
    }
}
