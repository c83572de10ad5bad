//! Tolerant field decoders for extractor output.
//!
//! The upstream field extractor is a best-effort inference service. It may
//! drop whole sections, emit `null`, quote numbers, or put a number where a
//! string belongs. Every decoder here accepts any JSON value and resolves
//! the ones it cannot interpret to the field's absent/default value, so a
//! claim record never fails to decode because of a single bad leaf.
//!
//! Key spelling is not trusted either. Objects are passed through
//! [`normalize_keys`] before decoding, so `policyNumber`, `PolicyNumber`,
//! `policy_number` and `POLICY-NUMBER` all name the same field.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Canonical spelling of an object key: lowercase, with `_`, `-` and
/// whitespace removed.
pub fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rewrite every object key (recursively) to its canonical spelling.
///
/// When several keys collapse to the same spelling the first non-null
/// value in document order is kept, so a repeated field never costs the
/// rest of its section.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());

            for (key, value) in map {
                let key = canonical_key(&key);
                let value = normalize_keys(value);

                match out.get(&key) {
                    Some(existing) if !existing.is_null() => {}
                    _ => {
                        out.insert(key, value);
                    }
                }
            }

            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Decode a nested section whose keys are already canonical, falling back
/// to its default when the value is missing, `null`, not an object, or
/// otherwise undecodable.
pub fn section<T>(value: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

/// Decode an optional text leaf.
///
/// Strings pass through unchanged (blank strings included; blankness is an
/// audit concern). Numbers and booleans keep their textual form.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Decode an optional monetary amount.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(&s),
        _ => None,
    })
}

/// Decode a boolean flag. Anything unrecognised is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

/// Parse a free-form amount such as `"$12,500.00"` or `"1.5e4"`.
///
/// Currency symbols, thousands separators and whitespace are ignored.
/// Returns `None` when nothing numeric remains.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
