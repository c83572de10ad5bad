use tracing::warn;

use crate::domain::ClaimRecord;

/// Remove Markdown code fences that inference services like to wrap JSON in.
///
/// Handles a leading ```` ```json ```` (or bare ```` ``` ````) line and a
/// trailing ```` ``` ````; text without fences is only trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string ("json", "JSON", ...) up to the first newline
        text = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Decode an extractor's answer into a claim record.
///
/// Never fails: malformed output is logged and yields the empty record, so
/// the claim still reaches the engine and is routed for manual review.
pub fn parse_extractor_output(raw: &str) -> ClaimRecord {
    let body = strip_code_fences(raw);

    match ClaimRecord::from_json(body) {
        Ok(claim) => claim,
        Err(e) => {
            warn!(error = %e, "Extractor output is not valid JSON, using empty claim record");
            ClaimRecord::default()
        }
    }
}
