use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Structured claim extracted from a First Notice of Loss document.
///
/// Every field is independently optional. Decoding never fails on a
/// JSON object: missing or malformed sections resolve to empty sections,
/// and judging completeness is left to the assessment engine. Keys are
/// matched ignoring case, `_` and `-`. Serialization always uses the
/// camelCase wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ClaimRecord {
    #[serde(rename = "policyDetails")]
    pub policy: PolicyDetails,

    #[serde(rename = "incidentDetails")]
    pub incident: IncidentDetails,

    #[serde(rename = "involvedParties")]
    pub parties: InvolvedParties,

    #[serde(rename = "assetDetails")]
    pub asset: AssetDetails,

    #[serde(rename = "mandatoryData")]
    pub mandatory: MandatoryData,
}

impl From<Value> for ClaimRecord {
    fn from(value: Value) -> Self {
        ClaimRecord::from_value(value)
    }
}

impl ClaimRecord {
    /// Build a record from an arbitrary JSON value.
    ///
    /// Anything other than an object yields the empty record.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut sections) = lenient::normalize_keys(value) else {
            return ClaimRecord::default();
        };

        ClaimRecord {
            policy: lenient::section(sections.remove("policydetails")),
            incident: lenient::section(sections.remove("incidentdetails")),
            parties: lenient::section(sections.remove("involvedparties")),
            asset: lenient::section(sections.remove("assetdetails")),
            mandatory: lenient::section(sections.remove("mandatorydata")),
        }
    }

    /// Parse a record from JSON text.
    ///
    /// Only a syntax error is reported; structurally odd payloads decode
    /// per [`ClaimRecord::from_value`].
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(ClaimRecord::from_value(value))
    }

    /// Incident description, if present and not blank.
    pub fn description(&self) -> Option<&str> {
        non_blank(&self.incident.description)
    }

    /// Claim type, if present and not blank.
    pub fn claim_type(&self) -> Option<&str> {
        non_blank(&self.mandatory.claim_type)
    }

    /// Estimated damage, if one was extracted.
    pub fn estimated_damage(&self) -> Option<Decimal> {
        self.asset.estimated_damage
    }
}

/// Returns the trimmed value when it carries any non-whitespace text.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// Section types decode from canonical keys (see `lenient::normalize_keys`);
// go through `ClaimRecord::from_value` rather than decoding them directly.

/// Policy identification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct PolicyDetails {
    #[serde(rename(deserialize = "policynumber"), deserialize_with = "lenient::text")]
    pub policy_number: Option<String>,

    #[serde(rename(deserialize = "policyholdername"), deserialize_with = "lenient::text")]
    pub policy_holder_name: Option<String>,

    #[serde(rename(deserialize = "effectivedate"), deserialize_with = "lenient::text")]
    pub effective_date: Option<String>,

    #[serde(rename(deserialize = "expirationdate"), deserialize_with = "lenient::text")]
    pub expiration_date: Option<String>,
}

/// When, where and what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct IncidentDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub time: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

/// People involved in the loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct InvolvedParties {
    #[serde(rename(deserialize = "claimantname"), deserialize_with = "lenient::text")]
    pub claimant_name: Option<String>,

    #[serde(rename(deserialize = "thirdpartyname"), deserialize_with = "lenient::text")]
    pub third_party_name: Option<String>,

    #[serde(rename(deserialize = "contactphone"), deserialize_with = "lenient::text")]
    pub contact_phone: Option<String>,

    #[serde(rename(deserialize = "contactemail"), deserialize_with = "lenient::text")]
    pub contact_email: Option<String>,
}

/// The damaged asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct AssetDetails {
    /// e.g. "Vehicle", "Property"
    #[serde(rename(deserialize = "assettype"), deserialize_with = "lenient::text")]
    pub asset_type: Option<String>,

    /// VIN, parcel id or similar
    #[serde(rename(deserialize = "assetid"), deserialize_with = "lenient::text")]
    pub asset_id: Option<String>,

    /// Absent is not the same as zero.
    #[serde(
        rename(deserialize = "estimateddamage"),
        deserialize_with = "lenient::amount",
        serialize_with = "rust_decimal::serde::arbitrary_precision_option::serialize"
    )]
    pub estimated_damage: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct MandatoryData {
    /// Free text such as "Bodily Injury", "Property Damage" or "Theft".
    #[serde(rename(deserialize = "claimtype"), deserialize_with = "lenient::text")]
    pub claim_type: Option<String>,

    #[serde(rename(deserialize = "hasattachments"), deserialize_with = "lenient::flag")]
    pub has_attachments: bool,

    #[serde(rename(deserialize = "hasinitialestimate"), deserialize_with = "lenient::flag")]
    pub has_initial_estimate: bool,
}
