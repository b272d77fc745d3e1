//! One side of the bridge: registry, pending calls, dispatch, and transport
//! wired into a single state machine.

use std::cell::RefCell;

use serde_json::Value;

use crate::action::{self, Action};
use crate::codec;
use crate::dispatch;
use crate::pending::{PendingCalls, ResultCallback};
use crate::registry::{HandlerRegistry, HandlerResult};
use crate::transport::Transport;

/// Largest payload handed to the transport, in bytes.
pub const MAX_OUTGOING: usize = 1_048_576; // 1 MiB
/// Largest payload `on_receive` will look at, in bytes.
pub const MAX_INCOMING: usize = 64 * 1_048_576; // 64 MiB

/// Size caps applied to payloads in both directions.
///
/// A runaway payload is dropped at the boundary instead of being handed to
/// the peer; the drop is logged, never a fault.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub max_outgoing: usize,
    pub max_incoming: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_outgoing: MAX_OUTGOING,
            max_incoming: MAX_INCOMING,
        }
    }
}

/// One endpoint of the call-correlation protocol.
///
/// A bridge owns its handler registry and pending-call table exclusively and
/// must only be touched from its owning thread; it is deliberately neither
/// `Send` nor `Sync`. Cross-thread callers go through
/// [`BridgeHandle`](crate::handle::BridgeHandle) instead.
///
/// No operation blocks. Outbound calls are fire-and-forget at this layer;
/// results arrive later through [`Bridge::on_receive`], which the embedder
/// wires to whatever delivers peer payloads (a script message handler, a
/// drained queue, a test harness).
///
/// No borrow of any internal table is held while a handler or continuation
/// runs, so both may re-enter any bridge operation.
#[derive(Default)]
pub struct Bridge {
    registry: HandlerRegistry,
    pending: PendingCalls,
    transport: RefCell<Option<Box<dyn Transport>>>,
    config: BridgeConfig,
}

impl Bridge {
    /// Bridge with default payload caps. Not yet attached to a transport:
    /// handlers may be registered immediately, but calls and receipts are
    /// dropped until [`Bridge::attach`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Wire the outbound transport. Replaces any previously attached one.
    pub fn attach(&self, transport: impl Transport + 'static) {
        *self.transport.borrow_mut() = Some(Box::new(transport));
    }

    /// Register a handler the peer can invoke by name.
    ///
    /// May be called before or after the bridge is attached. Registering an
    /// existing name replaces the previous handler.
    pub fn register_handler<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[Value]) -> HandlerResult + 'static,
    {
        self.registry.register(name, handler);
    }

    /// Remove a handler. Removing an unknown name is a no-op.
    pub fn remove_handler(&self, name: &str) {
        self.registry.unregister(name);
    }

    /// Invoke a handler registered on the peer side.
    ///
    /// With a callback, a fresh nonzero correlation id is allocated and the
    /// callback runs exactly once when the matching reply arrives (which may
    /// be never, if the peer or the transport loses the call). Without a
    /// callback the call goes out with id 0 and the peer sends no reply.
    ///
    /// On a detached (never attached or torn down) bridge this is a complete
    /// no-op: nothing is stored and nothing is sent.
    pub fn call_handler(&self, name: &str, args: Vec<Value>, callback: Option<ResultCallback>) {
        if self.transport.borrow().is_none() {
            tracing::debug!(handler = name, "call on detached bridge dropped");
            return;
        }
        let id = match callback {
            Some(callback) => self.pending.insert(callback),
            None => 0,
        };
        let payload = action::pack_actions(&[Action::new(id, name, args)]);
        if payload.len() > self.config.max_outgoing {
            tracing::warn!(
                handler = name,
                bytes = payload.len(),
                cap = self.config.max_outgoing,
                "outgoing call over payload cap, dropped"
            );
            if id != 0 {
                drop(self.pending.take(id));
            }
            return;
        }
        self.post(&payload);
    }

    /// Receipt entry point for everything the peer sends.
    ///
    /// A JSON array is treated as an action batch: each element is dispatched
    /// in order and its reply, if requested, goes back over the same
    /// transport. A JSON object carrying a `status` field is treated as a
    /// reply to one of our own calls. Anything else (malformed JSON, wrong
    /// shape, a stale correlation id) is ignored where it stands; a batch is
    /// never rejected wholesale for one bad element.
    pub fn on_receive(&self, raw: &str) {
        if self.transport.borrow().is_none() {
            tracing::debug!("payload received on detached bridge ignored");
            return;
        }
        if raw.len() > self.config.max_incoming {
            tracing::warn!(
                bytes = raw.len(),
                cap = self.config.max_incoming,
                "incoming payload over cap, ignored"
            );
            return;
        }
        let Some(value) = codec::decode(raw) else {
            tracing::debug!("undecodable payload ignored");
            return;
        };
        match value {
            Value::Array(_) => self.handle_batch(value),
            Value::Object(_) => self.handle_reply(value),
            _ => tracing::debug!("payload with unexpected shape ignored"),
        }
    }

    /// Detach the bridge from its transport.
    ///
    /// Idempotent. No further actions are dispatched and no further replies
    /// are resolved afterward. Outstanding pending entries are abandoned, not
    /// failed: their callbacks simply never run.
    pub fn teardown(&self) {
        if self.transport.borrow_mut().take().is_some() {
            tracing::debug!(abandoned = self.pending.len(), "bridge torn down");
        }
    }

    /// Count of calls still awaiting a reply.
    ///
    /// The base protocol never expires these; an embedder that suspects its
    /// transport of dropping payloads can watch this for growth.
    pub fn pending_calls(&self) -> usize {
        self.pending.len()
    }

    fn handle_batch(&self, value: Value) {
        for act in action::actions_from_value(value) {
            if let Some(reply) = dispatch::dispatch(&self.registry, &act) {
                let payload = action::pack_result(&reply);
                if payload.len() > self.config.max_outgoing {
                    tracing::warn!(
                        id = reply.id,
                        bytes = payload.len(),
                        "reply over payload cap, dropped"
                    );
                    continue;
                }
                self.post(&payload);
            }
        }
    }

    fn handle_reply(&self, value: Value) {
        let Some(result) = action::result_from_value(value) else {
            return;
        };
        let Some(callback) = self.pending.take(result.id) else {
            tracing::debug!(id = result.id, "reply with no pending call ignored");
            return;
        };
        // The entry is already gone: a duplicate reply for the same id is a
        // no-op, and the callback may re-enter the bridge freely.
        callback(result.status, result.result);
    }

    fn post(&self, payload: &str) {
        if let Some(transport) = self.transport.borrow_mut().as_mut() {
            transport.send(payload);
        }
    }
}
