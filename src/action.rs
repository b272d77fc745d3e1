//! The two message shapes that cross the bridge, and their wire packing.
//!
//! An [`Action`] asks the peer to run a named handler; an [`ActionResult`]
//! carries the outcome back, correlated by id. Batches travel as JSON arrays
//! of `{"id", "name", "args", "argsCount"}` objects, results as a single
//! `{"id", "status", "args"}` object where `args` holds zero or one value.
//!
//! Unpacking is deliberately lenient: a malformed element is dropped and the
//! rest of the batch is still processed, so one bad entry can never stall
//! unrelated in-flight calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec;

/// A request to run a named handler on the peer side.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Correlation id. `0` means fire-and-forget: no reply is ever sent.
    pub id: i64,
    /// Target handler name. Never empty in a well-formed action.
    pub name: String,
    /// Positional arguments for the handler.
    pub args: Vec<Value>,
}

impl Action {
    pub fn new(id: i64, name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            id,
            name: name.into(),
            args,
        }
    }

    /// Whether the caller asked for a reply.
    pub fn expects_reply(&self) -> bool {
        self.id != 0
    }
}

/// The outcome of one handler invocation, correlated back by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    /// Correlation id of the action this result answers. Never 0 on the wire.
    pub id: i64,
    /// `true` if the handler ran successfully, `false` on failure or when no
    /// handler was registered under the requested name.
    pub status: bool,
    /// Value the handler produced, if any.
    pub result: Option<Value>,
}

impl ActionResult {
    /// Failure result with no value (unknown handler, handler fault).
    pub fn failure(id: i64) -> Self {
        Self {
            id,
            status: false,
            result: None,
        }
    }
}

/// Wire form of one action batch element.
#[derive(Serialize, Deserialize)]
struct WireAction {
    id: i64,
    name: String,
    args: Vec<Value>,
    #[serde(rename = "argsCount")]
    args_count: usize,
}

/// Wire form of a result. `args` carries zero or one value.
#[derive(Serialize, Deserialize)]
struct WireResult {
    id: i64,
    status: bool,
    args: Vec<Value>,
}

/// Unpack an encoded action batch.
///
/// Anything that is not a JSON array of objects yields an empty batch. Each
/// element must carry an integer `id`, a non-empty string `name`, an `args`
/// array, and an `argsCount` matching `args` exactly; elements failing any of
/// these checks are dropped while the rest of the batch is kept.
pub fn unpack_actions(raw: &str) -> Vec<Action> {
    match codec::decode(raw) {
        Some(value) => actions_from_value(value),
        None => Vec::new(),
    }
}

/// Unpack a single value returned by the peer.
pub fn unpack_result(raw: &str) -> Option<Value> {
    codec::decode(raw)
}

pub(crate) fn actions_from_value(value: Value) -> Vec<Action> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items.into_iter().filter_map(action_from_value).collect()
}

fn action_from_value(value: Value) -> Option<Action> {
    let wire: WireAction = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(err) => {
            tracing::debug!(%err, "dropping malformed action element");
            return None;
        }
    };
    if wire.name.is_empty() {
        tracing::debug!("dropping action with empty handler name");
        return None;
    }
    if wire.args_count != wire.args.len() {
        tracing::debug!(
            name = %wire.name,
            declared = wire.args_count,
            actual = wire.args.len(),
            "dropping action with argsCount mismatch"
        );
        return None;
    }
    Some(Action {
        id: wire.id,
        name: wire.name,
        args: wire.args,
    })
}

/// Parse a result object. Requires a nonzero integer `id`, a boolean
/// `status`, and an `args` array of length 0 or 1; anything else is dropped
/// (a result with id 0 cannot be correlated to any caller).
pub(crate) fn result_from_value(value: Value) -> Option<ActionResult> {
    let wire: WireResult = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(err) => {
            tracing::debug!(%err, "dropping malformed result payload");
            return None;
        }
    };
    if wire.id == 0 || wire.args.len() > 1 {
        tracing::debug!(id = wire.id, "dropping uncorrelatable result payload");
        return None;
    }
    let mut args = wire.args;
    Some(ActionResult {
        id: wire.id,
        status: wire.status,
        result: args.pop(),
    })
}

/// Pack a batch of actions for transmission. `argsCount` is filled in from
/// the argument list so the two can never disagree on the sending side.
pub fn pack_actions(actions: &[Action]) -> String {
    let wire: Vec<WireAction> = actions
        .iter()
        .map(|action| WireAction {
            id: action.id,
            name: action.name.clone(),
            args: action.args.clone(),
            args_count: action.args.len(),
        })
        .collect();
    serde_json::to_string(&wire).unwrap_or_default()
}

/// Pack a result for transmission.
pub fn pack_result(result: &ActionResult) -> String {
    let wire = WireResult {
        id: result.id,
        status: result.status,
        args: result.result.clone().into_iter().collect(),
    };
    serde_json::to_string(&wire).unwrap_or_default()
}
