//! Key Normalization
//!
//! Canonical string identities for arbitrary serializable keys.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Namespace token prepended to every normalized key.
const KEY_PREFIX: &str = "__cache__";

/// Failure to derive a canonical identity for a key
#[derive(Debug, Error)]
pub(crate) enum KeyError {
    #[error("key is not serializable: {0}")]
    Unserializable(#[from] serde_json::Error),
}

/// Derive the canonical lookup string for a key.
///
/// Keys that serialize to a plain string keep their raw content; everything
/// else is rendered as canonical JSON with object keys sorted and sequence
/// order preserved. Two structurally equal keys therefore normalize
/// identically regardless of map insertion order, while sequences with the
/// same elements in a different order stay distinct. The result reflects the
/// key's value at call time only.
pub(crate) fn normalize<K: Serialize + ?Sized>(key: &K) -> Result<String, KeyError> {
    // `serde_json::to_value` backs objects with a BTreeMap, which gives the
    // sorted-key canonical rendering.
    let rendered = match serde_json::to_value(key)? {
        Value::String(raw) => raw,
        other => other.to_string(),
    };
    Ok(format!("{KEY_PREFIX}{rendered}"))
}
