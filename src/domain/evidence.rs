use serde::{Deserialize, Serialize};

use super::Route;

/// Evidence captured when a routing rule fires.
///
/// Provides audit trail information about why a route was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// The rule that fired
    pub rule_id: String,

    /// Claim field that was inspected (e.g., "incidentDescription", "claimType")
    pub field: String,

    /// The value, or matched fragment, that fired the rule
    pub value: String,

    /// The threshold that was applied (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Evidence {
    /// Create evidence for a rule hit.
    pub fn new(rule_id: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Evidence {
            rule_id: rule_id.into(),
            field: field.into(),
            value: value.into(),
            limit: None,
        }
    }

    /// Create evidence with a limit/threshold.
    pub fn with_limit(
        rule_id: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        limit: impl Into<String>,
    ) -> Self {
        Evidence {
            rule_id: rule_id.into(),
            field: field.into(),
            value: value.into(),
            limit: Some(limit.into()),
        }
    }
}

/// Result of evaluating one routing rule.
#[derive(Debug, Clone)]
pub struct RuleResult {
    /// Whether the rule fired
    pub hit: bool,

    /// The route if the rule fired
    pub route: Option<Route>,

    /// Reasoning sentence if the rule fired
    pub reasoning: String,

    /// Evidence if the rule fired
    pub evidence: Option<Evidence>,
}

impl RuleResult {
    /// The rule did not fire; evaluation moves on.
    #[inline]
    pub fn pass() -> Self {
        RuleResult {
            hit: false,
            route: None,
            reasoning: String::new(),
            evidence: None,
        }
    }

    /// The rule fired and decides the route.
    pub fn trigger(route: Route, reasoning: impl Into<String>, evidence: Evidence) -> Self {
        RuleResult {
            hit: true,
            route: Some(route),
            reasoning: reasoning.into(),
            evidence: Some(evidence),
        }
    }
}

impl Default for RuleResult {
    fn default() -> Self {
        RuleResult::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_creation() {
        let ev = Evidence::new("R1_FRAUD_KEYWORDS", "incidentDescription", "staged");
        assert_eq!(ev.rule_id, "R1_FRAUD_KEYWORDS");
        assert_eq!(ev.field, "incidentDescription");
        assert_eq!(ev.value, "staged");
        assert!(ev.limit.is_none());
    }

    #[test]
    fn test_evidence_with_limit() {
        let ev = Evidence::with_limit("R4_FAST_TRACK", "estimatedDamage", "10000", "25000");
        assert_eq!(ev.limit, Some("25000".to_string()));

        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"ruleId\":\"R4_FAST_TRACK\""));
    }

    #[test]
    fn test_rule_result_variants() {
        let pass = RuleResult::pass();
        assert!(!pass.hit);
        assert!(pass.route.is_none());

        let hit = RuleResult::trigger(
            Route::SpecialistQueue,
            "Claim involves personal injury.",
            Evidence::new("R2", "claimType", "injury"),
        );
        assert!(hit.hit);
        assert_eq!(hit.route, Some(Route::SpecialistQueue));
        assert_eq!(hit.evidence.unwrap().value, "injury");
    }
}
