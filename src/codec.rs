use serde_json::Value;

/// Serialize a value into its transport string form (JSON text).
///
/// An unserializable value yields the empty string; the bridge treats an
/// empty payload as nothing to send. For `serde_json::Value` inputs this
/// path is unreachable in practice, but the codec never panics either way.
pub fn encode(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Parse a transport string back into a value.
///
/// Malformed input yields `None`, which callers treat identically to
/// "no data". A decode failure is never surfaced to the peer side.
pub fn decode(raw: &str) -> Option<Value> {
    serde_json::from_str(raw).ok()
}
