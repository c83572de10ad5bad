use crate::domain::assessment::join_labels;
use crate::domain::{Evidence, Route, RuleResult};
use crate::rules::traits::{AuditedClaim, RoutingRule};

/// Sends incomplete claims to manual review.
///
/// Reads the audit attached to the claim; the reasoning lists every
/// missing label in audit order.
#[derive(Debug)]
pub struct MissingFieldsRule {
    id: String,
}

impl MissingFieldsRule {
    pub fn new(id: String) -> Self {
        MissingFieldsRule { id }
    }
}

impl RoutingRule for MissingFieldsRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn route(&self) -> Route {
        Route::ManualReview
    }

    fn evaluate(&self, claim: &AuditedClaim<'_>) -> RuleResult {
        if claim.missing.is_empty() {
            return RuleResult::pass();
        }

        let labels = join_labels(claim.missing);

        RuleResult::trigger(
            Route::ManualReview,
            format!("Mandatory fields are missing: {labels}"),
            Evidence::new(&self.id, "missingFields", labels),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClaimRecord, MissingField};

    #[test]
    fn test_complete_claim_passes() {
        let rule = MissingFieldsRule::new("R3_MISSING_FIELDS".to_string());
        let claim = ClaimRecord::default();

        let result = rule.evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(!result.hit);
    }

    #[test]
    fn test_single_missing_field() {
        let rule = MissingFieldsRule::new("R3_MISSING_FIELDS".to_string());
        let claim = ClaimRecord::default();
        let missing = [MissingField::PolicyNumber];

        let result = rule.evaluate(&AuditedClaim::new(&claim, &missing));

        assert!(result.hit);
        assert_eq!(result.route, Some(Route::ManualReview));
        assert_eq!(result.reasoning, "Mandatory fields are missing: Policy Number");
    }

    #[test]
    fn test_multiple_missing_fields_in_order() {
        let rule = MissingFieldsRule::new("R3_MISSING_FIELDS".to_string());
        let claim = ClaimRecord::default();

        let result = rule.evaluate(&AuditedClaim::new(&claim, &MissingField::AUDIT_ORDER));

        assert_eq!(
            result.reasoning,
            "Mandatory fields are missing: Policy Number, Policy Holder Name, Incident Date, Incident Description"
        );
        assert_eq!(result.evidence.unwrap().field, "missingFields");
    }
}
