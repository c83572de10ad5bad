use rust_decimal::Decimal;

use crate::domain::{Evidence, Route, RuleResult};
use crate::rules::traits::{AuditedClaim, RoutingRule};

/// Fast-track rule for low-value claims.
///
/// Fires when the estimated damage is present and strictly below the
/// limit. A claim exactly at the limit, or with no estimate, does not
/// fast-track. Completeness is enforced by the rule ahead of this one.
#[derive(Debug)]
pub struct FastTrackRule {
    id: String,
    limit: Decimal,
    reasoning: String,
}

impl FastTrackRule {
    /// Create a new fast-track rule with the given damage limit.
    pub fn new(id: String, limit: Decimal) -> Self {
        let reasoning = format!(
            "Estimated damage is under ${} and all data is present.",
            format_amount(limit)
        );

        FastTrackRule {
            id,
            limit,
            reasoning,
        }
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }
}

impl RoutingRule for FastTrackRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn route(&self) -> Route {
        Route::FastTrack
    }

    fn evaluate(&self, claim: &AuditedClaim<'_>) -> RuleResult {
        let damage = match claim.claim.estimated_damage() {
            Some(d) => d,
            None => return RuleResult::pass(),
        };

        if damage < self.limit {
            return RuleResult::trigger(
                Route::FastTrack,
                self.reasoning.clone(),
                Evidence::with_limit(
                    &self.id,
                    "estimatedDamage",
                    damage.to_string(),
                    self.limit.to_string(),
                ),
            );
        }

        RuleResult::pass()
    }
}

/// Format an amount with thousands separators, e.g. `25000` -> `25,000`.
///
/// Trailing fractional zeros are dropped; no rounding or currency
/// conversion is applied.
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.normalize().abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClaimRecord;
    use rust_decimal_macros::dec;

    fn rule() -> FastTrackRule {
        FastTrackRule::new("R4_FAST_TRACK".to_string(), dec!(25000))
    }

    fn claim_with_damage(damage: Option<Decimal>) -> ClaimRecord {
        let mut claim = ClaimRecord::default();
        claim.asset.estimated_damage = damage;
        claim
    }

    #[test]
    fn test_under_limit() {
        let claim = claim_with_damage(Some(dec!(10000)));
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(result.hit);
        assert_eq!(result.route, Some(Route::FastTrack));
        assert_eq!(
            result.reasoning,
            "Estimated damage is under $25,000 and all data is present."
        );
        let ev = result.evidence.unwrap();
        assert_eq!(ev.value, "10000");
        assert_eq!(ev.limit, Some("25000".to_string()));
    }

    #[test]
    fn test_at_limit() {
        let claim = claim_with_damage(Some(dec!(25000)));
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(!result.hit); // At limit, not under
    }

    #[test]
    fn test_just_under_limit() {
        let claim = claim_with_damage(Some(dec!(24999.99)));
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(result.hit);
    }

    #[test]
    fn test_over_limit() {
        let claim = claim_with_damage(Some(dec!(30000)));
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(!result.hit);
    }

    #[test]
    fn test_absent_damage() {
        let claim = claim_with_damage(None);
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(!result.hit);
    }

    #[test]
    fn test_zero_damage_is_under_limit() {
        let claim = claim_with_damage(Some(Decimal::ZERO));
        let result = rule().evaluate(&AuditedClaim::new(&claim, &[]));

        assert!(result.hit);
    }

    #[test]
    fn test_custom_limit_reasoning() {
        let rule = FastTrackRule::new("R4".to_string(), dec!(1500000.50));
        assert_eq!(rule.limit(), dec!(1500000.50));
        assert_eq!(
            rule.reasoning,
            "Estimated damage is under $1,500,000.5 and all data is present."
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(25000.00)), "25,000");
        assert_eq!(format_amount(dec!(123456789.25)), "123,456,789.25");
        assert_eq!(format_amount(dec!(-4200)), "-4,200");
    }
}
