pub mod audit;
pub mod completeness;
pub mod damage;
pub mod keyword;
pub mod traits;

pub use audit::audit_missing;
pub use completeness::MissingFieldsRule;
pub use damage::FastTrackRule;
pub use keyword::{ClaimText, KeywordRule};
pub use traits::{AuditedClaim, RoutingRule};

use crate::domain::{Assessment, ClaimRecord, Evaluation, Route, RoutingPolicy};
use std::sync::{Arc, LazyLock};

pub const FRAUD_RULE_ID: &str = "R1_FRAUD_KEYWORDS";
pub const INJURY_RULE_ID: &str = "R2_INJURY_CLAIM";
pub const MISSING_FIELDS_RULE_ID: &str = "R3_MISSING_FIELDS";
pub const FAST_TRACK_RULE_ID: &str = "R4_FAST_TRACK";

/// Identifier reported when no rule fires.
pub const DEFAULT_RULE_ID: &str = "DEFAULT";
pub const DEFAULT_REASONING: &str = "Standard processing required.";

static STANDARD: LazyLock<RuleSet> = LazyLock::new(RuleSet::standard);

/// Ordered routing rules ready for evaluation.
///
/// Rules are evaluated in order and the first one that fires decides the
/// route. When none fires the claim goes to manual review with the
/// standard reasoning.
#[derive(Debug)]
pub struct RuleSet {
    pub rules: Vec<Arc<dyn RoutingRule>>,
    pub policy_version: String,
}

impl RuleSet {
    /// Build the rule cascade from a routing policy.
    ///
    /// Priority is fixed: fraud screening, injury, completeness, then the
    /// fast-track threshold.
    pub fn from_policy(policy: &RoutingPolicy) -> Self {
        let params = &policy.params;

        let rules: Vec<Arc<dyn RoutingRule>> = vec![
            Arc::new(KeywordRule::fraud(
                FRAUD_RULE_ID.to_string(),
                &params.fraud_keywords,
            )),
            Arc::new(KeywordRule::injury(
                INJURY_RULE_ID.to_string(),
                &params.injury_keywords,
            )),
            Arc::new(MissingFieldsRule::new(MISSING_FIELDS_RULE_ID.to_string())),
            Arc::new(FastTrackRule::new(
                FAST_TRACK_RULE_ID.to_string(),
                params.fast_track_limit,
            )),
        ];

        RuleSet {
            rules,
            policy_version: policy.version.clone(),
        }
    }

    /// Rule set for the built-in policy.
    pub fn standard() -> Self {
        RuleSet::from_policy(&RoutingPolicy::standard())
    }

    /// Evaluate a claim, keeping the deciding rule and its evidence.
    ///
    /// The missing-field audit always runs first and is kept whatever
    /// route is chosen. The input is not modified.
    pub fn evaluate(&self, claim: &ClaimRecord) -> Evaluation {
        let missing = audit_missing(claim);
        let audited = AuditedClaim::new(claim, &missing);

        let mut rules_evaluated = 0;
        let mut decided = None;

        for rule in &self.rules {
            rules_evaluated += 1;
            let result = rule.evaluate(&audited);
            if let (true, Some(route)) = (result.hit, result.route) {
                decided = Some((rule.id().to_string(), route, result.reasoning, result.evidence));
                break;
            }
        }

        let (rule_id, route, reasoning, evidence) = decided.unwrap_or_else(|| {
            (
                DEFAULT_RULE_ID.to_string(),
                Route::ManualReview,
                DEFAULT_REASONING.to_string(),
                None,
            )
        });

        Evaluation {
            assessment: Assessment {
                extracted_fields: claim.clone(),
                missing_fields: missing,
                recommended_route: route,
                reasoning,
            },
            rule_id,
            evidence,
            rules_evaluated,
        }
    }

    /// Assess a claim.
    pub fn assess(&self, claim: &ClaimRecord) -> Assessment {
        self.evaluate(claim).assessment
    }

    /// Number of rules in the cascade.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Assess a claim against the built-in policy.
pub fn assess(claim: &ClaimRecord) -> Assessment {
    STANDARD.assess(claim)
}
