//! Cross-thread marshalling onto the bridge's owning task.
//!
//! A [`Bridge`] must only be touched from its owning thread. Code already
//! running there uses it directly; that is the "synchronously if already
//! there" half of the marshalling rule. Everything else clones a
//! [`BridgeHandle`] and enqueues operations over a channel onto the
//! [`OwnerLoop`], which drains them in order on the one task that owns the
//! bridge.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::pending::ResultCallback;

/// Handler variant that can cross threads on its way to the owner loop.
pub type SendHandler = Box<dyn Fn(&[Value]) -> (bool, Option<Value>) + Send>;

/// Result continuation that can cross threads on its way to the owner loop.
pub type SendCallback = Box<dyn FnOnce(bool, Option<Value>) + Send>;

enum Op {
    Register(String, SendHandler),
    Remove(String),
    Call {
        name: String,
        args: Vec<Value>,
        callback: Option<SendCallback>,
    },
    Deliver(String),
    Teardown,
}

/// Cloneable, `Send` front door to a bridge owned by a single task.
///
/// Operations are applied in the order they were enqueued. Every method is
/// fire-and-forget apart from the [`BridgeError::Detached`] it returns once
/// the owner loop has stopped.
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::UnboundedSender<Op>,
}

impl BridgeHandle {
    /// Register a handler the peer can invoke by name.
    pub fn register_handler<F>(
        &self,
        name: impl Into<String>,
        handler: F,
    ) -> Result<(), BridgeError>
    where
        F: Fn(&[Value]) -> (bool, Option<Value>) + Send + 'static,
    {
        self.push(Op::Register(name.into(), Box::new(handler)))
    }

    /// Remove a handler. Removing an unknown name is a no-op.
    pub fn remove_handler(&self, name: impl Into<String>) -> Result<(), BridgeError> {
        self.push(Op::Remove(name.into()))
    }

    /// Invoke a handler on the peer side; see [`Bridge::call_handler`].
    pub fn call_handler(
        &self,
        name: impl Into<String>,
        args: Vec<Value>,
        callback: Option<SendCallback>,
    ) -> Result<(), BridgeError> {
        self.push(Op::Call {
            name: name.into(),
            args,
            callback,
        })
    }

    /// Feed a payload received from the transport into the bridge.
    ///
    /// This is the receipt hook for embedders whose transport delivers on a
    /// thread other than the bridge's own.
    pub fn deliver(&self, payload: impl Into<String>) -> Result<(), BridgeError> {
        self.push(Op::Deliver(payload.into()))
    }

    /// Tear the bridge down and stop the owner loop.
    ///
    /// Operations already queued ahead of this one still run; operations
    /// enqueued after the loop stops return [`BridgeError::Detached`].
    pub fn teardown(&self) -> Result<(), BridgeError> {
        self.push(Op::Teardown)
    }

    fn push(&self, op: Op) -> Result<(), BridgeError> {
        self.tx.send(op).map_err(|_| BridgeError::Detached)
    }
}

/// Driver that applies queued operations to the bridge it owns.
pub struct OwnerLoop {
    bridge: Bridge,
    rx: mpsc::UnboundedReceiver<Op>,
}

impl OwnerLoop {
    /// Drain operations until a teardown op arrives or every handle is gone.
    ///
    /// The bridge is `!Send`, so this future must run on the task that
    /// created it, typically inside a `tokio::task::LocalSet`.
    pub async fn run(mut self) {
        while let Some(op) = self.rx.recv().await {
            match op {
                Op::Register(name, handler) => {
                    self.bridge.register_handler(name, move |args| handler(args));
                }
                Op::Remove(name) => self.bridge.remove_handler(&name),
                Op::Call {
                    name,
                    args,
                    callback,
                } => {
                    let callback = callback.map(|cb| -> ResultCallback {
                        Box::new(move |status, result| cb(status, result))
                    });
                    self.bridge.call_handler(&name, args, callback);
                }
                Op::Deliver(payload) => self.bridge.on_receive(&payload),
                Op::Teardown => {
                    self.bridge.teardown();
                    break;
                }
            }
        }
    }
}

/// Split a bridge into a `Send` handle and the loop that owns it.
pub fn pair(bridge: Bridge) -> (BridgeHandle, OwnerLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BridgeHandle { tx }, OwnerLoop { bridge, rx })
}
