//! Resolution and execution of one incoming action.

use crate::action::{Action, ActionResult};
use crate::registry::HandlerRegistry;

/// Run `action` against `registry`, producing the reply to send back, if any.
///
/// An unknown handler name yields a failure reply when one was requested,
/// never a fault. A fire-and-forget action (id 0) yields no reply at all;
/// whatever the handler returned is discarded, because the caller declared it
/// did not want one.
///
/// The handler itself runs with no registry borrow held, so it is free to
/// register or remove handlers while executing.
pub fn dispatch(registry: &HandlerRegistry, action: &Action) -> Option<ActionResult> {
    let Some(handler) = registry.resolve(&action.name) else {
        tracing::debug!(name = %action.name, "no handler registered for action");
        if action.expects_reply() {
            return Some(ActionResult::failure(action.id));
        }
        return None;
    };

    tracing::trace!(name = %action.name, id = action.id, "dispatching action");
    let (status, result) = handler(&action.args);

    if action.expects_reply() {
        Some(ActionResult {
            id: action.id,
            status,
            result,
        })
    } else {
        None
    }
}
