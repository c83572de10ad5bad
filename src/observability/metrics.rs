use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::{Evaluation, Route};

/// Metrics registry for the application.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total claims assessed
    pub assessments_total: AtomicU64,

    /// Assessments by route
    pub route_fast_track: AtomicU64,
    pub route_manual_review: AtomicU64,
    pub route_specialist_queue: AtomicU64,
    pub route_investigation_flag: AtomicU64,

    /// Assessments with at least one missing mandatory field
    pub claims_incomplete_total: AtomicU64,

    /// Assessment latency buckets (microseconds)
    pub latency_under_100us: AtomicU64,
    pub latency_100us_1ms: AtomicU64,
    pub latency_1_10ms: AtomicU64,
    pub latency_over_10ms: AtomicU64,

    /// Rule evaluation counts
    pub rules_evaluated_total: AtomicU64,
    pub rules_triggered_total: AtomicU64,

    /// Batch document outcomes
    pub documents_processed_total: AtomicU64,
    pub documents_skipped_total: AtomicU64,
    pub documents_failed_total: AtomicU64,

    /// Policy reloads
    pub policy_reloads_total: AtomicU64,
    pub policy_reload_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    fn route_counter(&self, route: Route) -> &AtomicU64 {
        match route {
            Route::FastTrack => &self.route_fast_track,
            Route::ManualReview => &self.route_manual_review,
            Route::SpecialistQueue => &self.route_specialist_queue,
            Route::InvestigationFlag => &self.route_investigation_flag,
        }
    }

    /// Record the outcome of one claim evaluation.
    pub fn record_evaluation(&self, evaluation: &Evaluation) {
        self.assessments_total.fetch_add(1, Ordering::Relaxed);
        self.route_counter(evaluation.route())
            .fetch_add(1, Ordering::Relaxed);

        if !evaluation.assessment.is_complete() {
            self.claims_incomplete_total.fetch_add(1, Ordering::Relaxed);
        }

        self.rules_evaluated_total
            .fetch_add(evaluation.rules_evaluated as u64, Ordering::Relaxed);
        if evaluation.evidence.is_some() {
            self.rules_triggered_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record assessment latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 100 {
            self.latency_under_100us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 1000 {
            self.latency_100us_1ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 10000 {
            self.latency_1_10ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_10ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_document_processed(&self) {
        self.documents_processed_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_document_skipped(&self) {
        self.documents_skipped_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_document_failed(&self) {
        self.documents_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a policy reload.
    pub fn record_policy_reload(&self, success: bool) {
        self.policy_reloads_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.policy_reload_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP claimroute_assessments_total Total number of claims assessed
# TYPE claimroute_assessments_total counter
claimroute_assessments_total {}

# HELP claimroute_assessments Claims assessed by recommended route
# TYPE claimroute_assessments counter
claimroute_assessments{{route="{}"}} {}
claimroute_assessments{{route="{}"}} {}
claimroute_assessments{{route="{}"}} {}
claimroute_assessments{{route="{}"}} {}

# HELP claimroute_claims_incomplete_total Claims missing at least one mandatory field
# TYPE claimroute_claims_incomplete_total counter
claimroute_claims_incomplete_total {}

# HELP claimroute_assessment_latency_bucket Assessment latency histogram
# TYPE claimroute_assessment_latency_bucket counter
claimroute_assessment_latency_bucket{{le="0.0001"}} {}
claimroute_assessment_latency_bucket{{le="0.001"}} {}
claimroute_assessment_latency_bucket{{le="0.01"}} {}
claimroute_assessment_latency_bucket{{le="+Inf"}} {}

# HELP claimroute_rules_evaluated_total Total rule evaluations
# TYPE claimroute_rules_evaluated_total counter
claimroute_rules_evaluated_total {}

# HELP claimroute_rules_triggered_total Total rules that fired
# TYPE claimroute_rules_triggered_total counter
claimroute_rules_triggered_total {}

# HELP claimroute_documents Batch documents by outcome
# TYPE claimroute_documents counter
claimroute_documents{{outcome="processed"}} {}
claimroute_documents{{outcome="skipped"}} {}
claimroute_documents{{outcome="failed"}} {}

# HELP claimroute_policy_reloads_total Policy reload operations
# TYPE claimroute_policy_reloads_total counter
claimroute_policy_reloads_total {}

# HELP claimroute_policy_reload_errors_total Policy reload errors
# TYPE claimroute_policy_reload_errors_total counter
claimroute_policy_reload_errors_total {}
"#,
            self.assessments_total.load(Ordering::Relaxed),
            Route::FastTrack.metric_key(),
            self.route_fast_track.load(Ordering::Relaxed),
            Route::ManualReview.metric_key(),
            self.route_manual_review.load(Ordering::Relaxed),
            Route::SpecialistQueue.metric_key(),
            self.route_specialist_queue.load(Ordering::Relaxed),
            Route::InvestigationFlag.metric_key(),
            self.route_investigation_flag.load(Ordering::Relaxed),
            self.claims_incomplete_total.load(Ordering::Relaxed),
            self.latency_under_100us.load(Ordering::Relaxed),
            self.latency_100us_1ms.load(Ordering::Relaxed),
            self.latency_1_10ms.load(Ordering::Relaxed),
            self.latency_over_10ms.load(Ordering::Relaxed),
            self.rules_evaluated_total.load(Ordering::Relaxed),
            self.rules_triggered_total.load(Ordering::Relaxed),
            self.documents_processed_total.load(Ordering::Relaxed),
            self.documents_skipped_total.load(Ordering::Relaxed),
            self.documents_failed_total.load(Ordering::Relaxed),
            self.policy_reloads_total.load(Ordering::Relaxed),
            self.policy_reload_errors.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}
