//! Hook failure policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownPolicy;

/// What a tick does when a queued action or an `update` hook fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the tick and return the error to the caller. Work after the
    /// failing item does not run.
    #[default]
    Propagate,
    /// Log the error and carry on with the next action or system.
    Isolate,
}

impl FromStr for FailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "isolate" => Ok(Self::Isolate),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propagate => f.write_str("propagate"),
            Self::Isolate => f.write_str("isolate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_propagate() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Propagate);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Isolate".parse::<FailurePolicy>(), Ok(FailurePolicy::Isolate));
        assert_eq!(" propagate ".parse::<FailurePolicy>(), Ok(FailurePolicy::Propagate));
        let err = "Ignore".parse::<FailurePolicy>().unwrap_err();
        assert_eq!(err, UnknownPolicy("ignore".to_string()));
        assert_eq!(err.to_string(), "unknown failure policy `ignore`");
    }
}
