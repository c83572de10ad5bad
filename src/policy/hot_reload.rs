use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, info, warn};

use crate::observability::MetricsRegistry;
use crate::rules::RuleSet;

use super::loader::{PolicyError, PolicyLoader};

/// Watch the routing policy file and broadcast updated rule sets.
pub struct PolicyWatcher {
    loader: PolicyLoader,
    check_interval: Duration,
    last_version: Option<String>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl PolicyWatcher {
    /// Create a new policy watcher.
    pub fn new(loader: PolicyLoader, check_interval: Duration) -> Self {
        PolicyWatcher {
            loader,
            check_interval,
            last_version: None,
            metrics: None,
        }
    }

    /// Record reload outcomes in the given registry.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Start watching for policy changes.
    ///
    /// Returns a receiver that will receive new RuleSet instances when
    /// the policy changes. If the initial load fails the built-in policy
    /// is served until a valid file appears.
    pub fn start(mut self) -> (watch::Receiver<Arc<RuleSet>>, tokio::task::JoinHandle<()>) {
        let initial_ruleset = match self.loader.load() {
            Ok((policy, ruleset)) => {
                info!(version = %policy.version, "Loaded initial routing policy");
                self.last_version = Some(policy.version);
                Arc::new(ruleset)
            }
            Err(e) => {
                error!(error = %e, "Failed to load routing policy, using built-in policy");
                Arc::new(RuleSet::standard())
            }
        };

        let (tx, rx) = watch::channel(initial_ruleset);

        let handle = tokio::spawn(async move {
            // Nothing to watch without a file
            if self.loader.policy_path().is_none() {
                return;
            }

            let mut interval = interval(self.check_interval);

            loop {
                interval.tick().await;

                match self.check_for_updates(&tx) {
                    Ok(true) => info!("Routing policy reloaded successfully"),
                    Ok(false) => {} // No changes
                    Err(e) => warn!(error = %e, "Error checking for policy updates"),
                }
            }
        });

        (rx, handle)
    }

    /// Check for policy updates and broadcast if changed.
    fn check_for_updates(&mut self, tx: &watch::Sender<Arc<RuleSet>>) -> Result<bool, PolicyError> {
        let (policy, ruleset) = match self.loader.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.record_reload(false);
                return Err(e);
            }
        };

        // Check if version changed
        if self.last_version.as_ref() == Some(&policy.version) {
            return Ok(false);
        }

        info!(
            previous = ?self.last_version,
            current = %policy.version,
            "Routing policy version changed"
        );

        self.last_version = Some(policy.version);
        self.record_reload(true);
        let _ = tx.send(Arc::new(ruleset));

        Ok(true)
    }

    fn record_reload(&self, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_policy_reload(success);
        }
    }
}
