use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Keywords in an incident description that suggest fraud.
pub const FRAUD_KEYWORDS: [&str; 3] = ["fraud", "staged", "inconsistent"];

/// Keywords in a claim type that indicate personal injury.
pub const INJURY_KEYWORDS: [&str; 1] = ["injury"];

/// Claims strictly below this estimated damage may be fast-tracked.
pub const FAST_TRACK_LIMIT: Decimal = dec!(25000);

/// Routing policy: the tunable inputs of the rule cascade.
///
/// Rule priority is fixed; the policy only supplies keyword lists and the
/// fast-track threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Policy version identifier
    #[serde(rename = "policy_version")]
    pub version: String,

    /// Parameters used by rules
    #[serde(default)]
    pub params: RoutingParams,

    /// Policy signature (for verification)
    #[serde(default)]
    pub signature: String,
}

impl RoutingPolicy {
    /// The built-in policy used when no policy file is configured.
    pub fn standard() -> Self {
        RoutingPolicy {
            version: "standard".to_string(),
            params: RoutingParams::default(),
            signature: String::new(),
        }
    }
}

/// Parameters used by rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingParams {
    /// Case-insensitive substrings of the incident description that flag fraud
    pub fraud_keywords: Vec<String>,

    /// Case-insensitive substrings of the claim type that mark injury claims
    pub injury_keywords: Vec<String>,

    /// Estimated damage must be strictly below this to fast-track
    pub fast_track_limit: Decimal,
}

impl Default for RoutingParams {
    fn default() -> Self {
        RoutingParams {
            fraud_keywords: FRAUD_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            injury_keywords: INJURY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            fast_track_limit: FAST_TRACK_LIMIT,
        }
    }
}
