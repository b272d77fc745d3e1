//! Correlation table for calls awaiting a reply.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::Value;

/// Continuation for one outstanding call, invoked with the peer's status and
/// optional result value. Runs at most once.
pub type ResultCallback = Box<dyn FnOnce(bool, Option<Value>)>;

/// Pending-call table keyed by correlation id.
///
/// Ids are allocated from a monotonic counter and never reused within a
/// session, so a late reply to an already-resolved call can never hit a
/// recycled entry. An entry whose reply never arrives stays in the table for
/// the life of the bridge; there is no timeout in the base protocol.
#[derive(Default)]
pub struct PendingCalls {
    next_id: Cell<i64>,
    entries: RefCell<HashMap<i64, ResultCallback>>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a continuation under a fresh nonzero id and return the id.
    pub fn insert(&self, callback: ResultCallback) -> i64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.entries.borrow_mut().insert(id, callback);
        id
    }

    /// Remove and return the continuation for `id`, if it is still live.
    ///
    /// Removal happens here, before the caller invokes the continuation, so
    /// each entry resolves at most once even when the continuation re-enters
    /// the bridge.
    pub fn take(&self, id: i64) -> Option<ResultCallback> {
        self.entries.borrow_mut().remove(&id)
    }

    /// Number of calls still awaiting a reply.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
