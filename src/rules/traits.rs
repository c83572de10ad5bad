use crate::domain::{ClaimRecord, MissingField, Route, RuleResult};
use std::fmt::Debug;

/// A claim together with its missing-field audit.
///
/// The audit runs once, before any routing rule, so rules that care about
/// completeness read it here instead of re-auditing.
#[derive(Debug, Clone, Copy)]
pub struct AuditedClaim<'a> {
    pub claim: &'a ClaimRecord,
    pub missing: &'a [MissingField],
}

impl<'a> AuditedClaim<'a> {
    pub fn new(claim: &'a ClaimRecord, missing: &'a [MissingField]) -> Self {
        AuditedClaim { claim, missing }
    }
}

/// Trait for routing rules.
///
/// Rules are pure: they read the claim and return a result without side
/// effects, so a rule set can be shared across threads and evaluated for
/// any number of claims concurrently.
pub trait RoutingRule: Send + Sync + Debug {
    /// Unique identifier for this rule.
    fn id(&self) -> &str;

    /// The route this rule assigns when it fires.
    fn route(&self) -> Route;

    /// Evaluate the rule against an audited claim.
    ///
    /// Returns a RuleResult indicating whether the rule fired and, if so,
    /// the reasoning and evidence behind it.
    fn evaluate(&self, claim: &AuditedClaim<'_>) -> RuleResult;
}
