use crate::domain::{ClaimRecord, Evidence, Route, RuleResult};
use crate::rules::traits::{AuditedClaim, RoutingRule};

/// Free-text claim fields a keyword rule can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimText {
    IncidentDescription,
    ClaimType,
}

impl ClaimText {
    /// Wire-style field name used in evidence.
    pub fn field_name(&self) -> &'static str {
        match self {
            ClaimText::IncidentDescription => "incidentDescription",
            ClaimText::ClaimType => "claimType",
        }
    }

    fn extract<'a>(&self, claim: &'a ClaimRecord) -> Option<&'a str> {
        match self {
            ClaimText::IncidentDescription => claim.description(),
            ClaimText::ClaimType => claim.claim_type(),
        }
    }
}

/// Case-insensitive substring screening of one free-text field.
///
/// Fires when the field is present and contains any configured keyword.
/// Used for both fraud screening (incident description) and injury
/// detection (claim type).
#[derive(Debug)]
pub struct KeywordRule {
    id: String,
    target: ClaimText,
    /// Lowercased, non-empty keywords
    keywords: Vec<String>,
    route: Route,
    reasoning: String,
}

impl KeywordRule {
    /// Create a new keyword rule.
    pub fn new(
        id: String,
        target: ClaimText,
        keywords: &[String],
        route: Route,
        reasoning: impl Into<String>,
    ) -> Self {
        // Normalize to lowercase
        let keywords = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        KeywordRule {
            id,
            target,
            keywords,
            route,
            reasoning: reasoning.into(),
        }
    }

    /// Fraud screening over the incident description.
    pub fn fraud(id: String, keywords: &[String]) -> Self {
        KeywordRule::new(
            id,
            ClaimText::IncidentDescription,
            keywords,
            Route::InvestigationFlag,
            "Potential fraud indicators detected in claim description.",
        )
    }

    /// Injury detection over the claim type.
    pub fn injury(id: String, keywords: &[String]) -> Self {
        KeywordRule::new(
            id,
            ClaimText::ClaimType,
            keywords,
            Route::SpecialistQueue,
            "Claim involves personal injury.",
        )
    }

    /// First configured keyword found in the text, if any.
    fn find_keyword(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }
}

impl RoutingRule for KeywordRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn route(&self) -> Route {
        self.route
    }

    fn evaluate(&self, claim: &AuditedClaim<'_>) -> RuleResult {
        let Some(text) = self.target.extract(claim.claim) else {
            return RuleResult::pass();
        };

        match self.find_keyword(text) {
            Some(keyword) => RuleResult::trigger(
                self.route,
                self.reasoning.clone(),
                Evidence::new(&self.id, self.target.field_name(), keyword),
            ),
            None => RuleResult::pass(),
        }
    }
}
