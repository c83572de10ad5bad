use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::{ClaimRecord, Evidence, Route};

/// A required field the extractor did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissingField {
    #[serde(rename = "Policy Number")]
    PolicyNumber,
    #[serde(rename = "Policy Holder Name")]
    PolicyHolderName,
    #[serde(rename = "Incident Date")]
    IncidentDate,
    #[serde(rename = "Incident Description")]
    IncidentDescription,
}

impl MissingField {
    /// Audit order. Missing-field lists and messages follow it.
    pub const AUDIT_ORDER: [MissingField; 4] = [
        MissingField::PolicyNumber,
        MissingField::PolicyHolderName,
        MissingField::IncidentDate,
        MissingField::IncidentDescription,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MissingField::PolicyNumber => "Policy Number",
            MissingField::PolicyHolderName => "Policy Holder Name",
            MissingField::IncidentDate => "Incident Date",
            MissingField::IncidentDescription => "Incident Description",
        }
    }

    /// The claim value this check inspects.
    pub fn value<'a>(&self, claim: &'a ClaimRecord) -> &'a Option<String> {
        match self {
            MissingField::PolicyNumber => &claim.policy.policy_number,
            MissingField::PolicyHolderName => &claim.policy.policy_holder_name,
            MissingField::IncidentDate => &claim.incident.date,
            MissingField::IncidentDescription => &claim.incident.description,
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Missing-field list; there are only four audited fields.
pub type MissingFields = SmallVec<[MissingField; 4]>;

/// Join missing-field labels for display, e.g. "Policy Number, Incident Date".
pub fn join_labels(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(MissingField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Final routing outcome for one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// The record that was evaluated, carried through for audit
    pub extracted_fields: ClaimRecord,

    /// Required fields that were absent or blank, in audit order
    pub missing_fields: MissingFields,

    pub recommended_route: Route,

    /// One sentence explaining the route
    pub reasoning: String,
}

impl Assessment {
    /// Returns true if every audited field was present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// An assessment together with the rule that decided it.
///
/// Both manual-review leaves share a route; `rule_id` tells them apart.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub assessment: Assessment,

    /// Identifier of the deciding rule, or the default leaf
    pub rule_id: String,

    /// Evidence from the deciding rule (none for the default leaf)
    pub evidence: Option<Evidence>,

    /// Number of rules evaluated before a decision was reached
    pub rules_evaluated: usize,
}

impl Evaluation {
    pub fn route(&self) -> Route {
        self.assessment.recommended_route
    }
}
