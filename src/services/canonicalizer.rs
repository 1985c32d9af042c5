//! Search Canonicalizer.
//!
//! Projects the host page's raw saved-search payload onto the identity used
//! for deduplication. The cache-busting token the page stamps into every
//! payload never takes part in equality.

use serde_json::Value;

use crate::types::errors::CanonicalizeError;
use crate::types::search::{ParsedSearch, SavedSearch, SearchRecord};

/// Payload field holding the per-write session token.
pub const VOLATILE_FIELD: &str = "12";

/// Parses a raw payload into its search key and canonical identity.
pub fn parse_search(raw_payload: &str) -> Result<ParsedSearch, CanonicalizeError> {
    let mut value: Value = serde_json::from_str(raw_payload)
        .map_err(|e| CanonicalizeError::MalformedPayload(format!("not JSON: {}", e)))?;

    match value.as_object_mut() {
        Some(map) => {
            map.remove(VOLATILE_FIELD);
        }
        None => {
            return Err(CanonicalizeError::MalformedPayload(
                "payload is not an object".to_string(),
            ))
        }
    }

    let saved: SavedSearch = serde_json::from_value(value)
        .map_err(|e| CanonicalizeError::MalformedPayload(e.to_string()))?;
    Ok(saved.into())
}

/// Returns the canonical identity of a raw payload.
pub fn canonicalize(raw_payload: &str) -> Result<SearchRecord, CanonicalizeError> {
    parse_search(raw_payload).map(|parsed| parsed.record)
}

/// Whether two raw payloads describe the same logical search.
pub fn same_search(a: &str, b: &str) -> bool {
    match (canonicalize(a), canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
