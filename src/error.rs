use thiserror::Error;

/// Errors surfaced at the host-facing seam of the bridge.
///
/// Protocol-level problems (malformed payloads, unknown handlers, stale
/// correlation ids) are never errors; they are recovered by dropping the
/// offending unit. What remains is the one thing a caller can actually act
/// on.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The owner loop has stopped; the bridge behind this handle is gone.
    #[error("bridge owner loop has stopped")]
    Detached,
}
