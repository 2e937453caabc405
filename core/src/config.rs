//! Transport configuration.

use serde::Deserialize;

const USER_AGENT_VAR: &str = "REQUESTABLE_USER_AGENT";
const ACCEPT_INVALID_CERTS_VAR: &str = "REQUESTABLE_ACCEPT_INVALID_CERTS";

/// Settings for the HTTP client behind `ReqwestTransport`.
///
/// Timeouts are left to the client's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub user_agent: String,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("requestable/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Defaults overridden by `REQUESTABLE_USER_AGENT` and
    /// `REQUESTABLE_ACCEPT_INVALID_CERTS` (`1` or `true`).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(agent) = lookup(USER_AGENT_VAR).filter(|v| !v.is_empty()) {
            config.user_agent = agent;
        }
        if let Some(flag) = lookup(ACCEPT_INVALID_CERTS_VAR) {
            config.accept_invalid_certs = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = TransportConfig::from_lookup(|_| None);
        assert_eq!(config, TransportConfig::default());
        assert!(config.user_agent.starts_with("requestable/"));
    }

    #[test]
    fn environment_overrides() {
        let config = TransportConfig::from_lookup(|name| match name {
            USER_AGENT_VAR => Some("custom-agent/2".to_string()),
            ACCEPT_INVALID_CERTS_VAR => Some("TRUE".to_string()),
            _ => None,
        });
        assert_eq!(config.user_agent, "custom-agent/2");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: TransportConfig = serde_json::from_str(r#"{"accept_invalid_certs":true}"#).unwrap();
        assert!(config.accept_invalid_certs);
        assert_eq!(config.user_agent, TransportConfig::default().user_agent);
    }
}
