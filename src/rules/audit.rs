use crate::domain::claim::non_blank;
use crate::domain::{ClaimRecord, MissingField, MissingFields};

/// Audit the mandatory fields of a claim.
///
/// Checks every field in [`MissingField::AUDIT_ORDER`] and reports the ones
/// that are absent or blank. Never short-circuits.
pub fn audit_missing(claim: &ClaimRecord) -> MissingFields {
    MissingField::AUDIT_ORDER
        .into_iter()
        .filter(|field| non_blank(field.value(claim)).is_none())
        .collect()
}
