use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::RoutingPolicy;
use crate::rules::RuleSet;

/// Errors that can occur during policy loading.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a routing policy from a YAML file.
pub fn load_policy(path: impl AsRef<Path>) -> Result<RoutingPolicy, PolicyError> {
    let content = fs::read_to_string(path)?;
    let policy: RoutingPolicy = serde_yaml::from_str(&content)?;

    validate_policy(&policy)?;

    Ok(policy)
}

/// Validate policy configuration.
fn validate_policy(policy: &RoutingPolicy) -> Result<(), PolicyError> {
    if policy.version.trim().is_empty() {
        return Err(PolicyError::Validation(
            "Policy version cannot be empty".to_string(),
        ));
    }

    let params = &policy.params;

    for (name, keywords) in [
        ("fraud_keywords", &params.fraud_keywords),
        ("injury_keywords", &params.injury_keywords),
    ] {
        if keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(PolicyError::Validation(format!(
                "{name} must contain at least one keyword"
            )));
        }

        let mut seen = HashSet::new();
        for keyword in keywords {
            if !seen.insert(keyword.trim().to_lowercase()) {
                return Err(PolicyError::Validation(format!(
                    "Duplicate keyword in {name}: {keyword}"
                )));
            }
        }
    }

    if params.fast_track_limit <= Decimal::ZERO {
        return Err(PolicyError::Validation(format!(
            "fast_track_limit must be positive, got {}",
            params.fast_track_limit
        )));
    }

    Ok(())
}

/// Policy loader that resolves the routing policy for a run.
///
/// Without a path the built-in policy is used.
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy_path: Option<PathBuf>,
}

impl PolicyLoader {
    /// Create a loader reading from the given YAML file.
    pub fn new(policy_path: impl Into<PathBuf>) -> Self {
        PolicyLoader {
            policy_path: Some(policy_path.into()),
        }
    }

    /// Create a loader that always yields the built-in policy.
    pub fn standard() -> Self {
        PolicyLoader { policy_path: None }
    }

    /// Create a loader from an optional path.
    pub fn from_path(policy_path: Option<PathBuf>) -> Self {
        PolicyLoader { policy_path }
    }

    /// Load the policy, returning it with its compiled RuleSet.
    pub fn load(&self) -> Result<(RoutingPolicy, RuleSet), PolicyError> {
        let policy = self.load_policy()?;
        let ruleset = RuleSet::from_policy(&policy);

        Ok((policy, ruleset))
    }

    /// Load only the policy (without building rules).
    pub fn load_policy(&self) -> Result<RoutingPolicy, PolicyError> {
        match &self.policy_path {
            Some(path) => load_policy(path),
            None => Ok(RoutingPolicy::standard()),
        }
    }

    /// Get the policy file path, if one is configured.
    pub fn policy_path(&self) -> Option<&Path> {
        self.policy_path.as_deref()
    }
}
