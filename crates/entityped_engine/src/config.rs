//! Engine configuration.

use serde::Deserialize;
use tracing::warn;

use entityped_system::FailurePolicy;

/// Environment variable read by [`EngineConfig::from_env`].
pub const FAILURE_POLICY_ENV: &str = "ENTITYPED_FAILURE_POLICY";

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// What a tick does when a queued action or an `update` hook fails.
    pub failure_policy: FailurePolicy,
}

impl EngineConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Build a config from the process environment.
    ///
    /// `ENTITYPED_FAILURE_POLICY` accepts `propagate` or `isolate`. Unset
    /// keeps the default; any other value is logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(FAILURE_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => config.failure_policy = policy,
                Err(err) => warn!(var = FAILURE_POLICY_ENV, error = %err, "ignoring invalid setting"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_propagates() {
        assert_eq!(EngineConfig::new().failure_policy, FailurePolicy::Propagate);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new().with_failure_policy(FailurePolicy::Isolate);
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_lookup_parses_policy() {
        let config = EngineConfig::from_lookup(|_| Some("isolate".to_string()));
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_lookup_ignores_garbage() {
        let config = EngineConfig::from_lookup(|_| Some("sometimes".to_string()));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(EngineConfig::from_lookup(|_| None), EngineConfig::default());
    }

    #[test]
    fn test_deserialize() {
        let config: EngineConfig = serde_json::from_str(r#"{"failurePolicy": "isolate"}"#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
