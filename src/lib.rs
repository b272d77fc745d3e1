//! # webview_bridge
//!
//! A bidirectional RPC bridge between a **native host** and an embedded
//! **web view**:
//!
//! - Let the page invoke named handlers registered on the host, with async results
//! - Let the host invoke named handlers registered in the page, with async results
//! - Multiplex any number of concurrent in-flight calls over one narrow
//!   "post a string" channel per direction
//!
//! The two sides never share memory. Everything that crosses the boundary is
//! JSON text, correlated by numeric ids.
//!
//! ---
//!
//! ## The wire protocol
//!
//! Each direction carries exactly two message shapes:
//!
//! 1. An **action batch** — a JSON array of objects
//!    `{"id": <int>, "name": <string>, "args": [...], "argsCount": <int>}`.
//!    `id` 0 means fire-and-forget; nonzero ids expect a reply. `argsCount`
//!    must equal `args.length` or the element is dropped as malformed.
//! 2. A **reply** — a JSON object `{"id": <int>, "status": <bool>,
//!    "args": [<result>] | []}` correlating back to a pending call.
//!
//! ### Most important gotchas (read this first)
//!
//! - **Handlers must not panic.** The wire has no representation for a native
//!   fault; convert internal failures to a `false` status yourself.
//! - **A reply may never come.** The core has no timeout: if the transport
//!   drops a payload, the pending entry stays forever. Watch
//!   [`Bridge::pending_calls`] if your transport is suspect.
//! - **One owning thread per side.** [`Bridge`] is `!Send` on purpose; see
//!   the [`handle`] module for marshalling from other threads.
//! - **Bad traffic is dropped, not fatal.** Malformed JSON, unknown handler
//!   names, and stale correlation ids are logged (via `tracing`) and
//!   swallowed. The worst symptom an application sees is "my call never got
//!   a reply" or a `false` status.
//!
//! ---
//!
//! ## Crate layout
//!
//! - [`bridge`] — the per-side state machine tying everything together.
//! - [`action`] — the two message shapes + pack/unpack.
//! - [`codec`] — JSON text ⇄ [`Value`].
//! - [`registry`] — name → handler lookup table.
//! - [`pending`] — correlation-id allocation and the pending-call table.
//! - [`dispatch`] — runs one incoming action against the registry.
//! - [`transport`] — the delivery seam + the two stock adapters.
//! - [`script`] — the JS core injected into the web view, as a static asset.
//! - [`handle`] — owning-thread marshalling (requires the `tokio` feature).
//!
//! ---
//!
//! ## Quick start
//!
//! ```rust
//! use webview_bridge::{Bridge, ChannelTransport, Value};
//!
//! let bridge = Bridge::new();
//!
//! // Registry and transport wiring can happen in either order.
//! bridge.register_handler("Image.ViewImage", |args: &[Value]| {
//!     match args.first().and_then(Value::as_i64) {
//!         Some(index) => (true, Some(Value::from(index))),
//!         None => (false, None),
//!     }
//! });
//!
//! // Attach whatever reaches your web view. In a real embedding this sink
//! // evaluates `ZHBridge.Core.callJsHandler(...)` / `callbackJs(...)`.
//! bridge.attach(ChannelTransport::new(|payload: &str| {
//!     let _ = payload;
//! }));
//!
//! // Host → page, fire-and-forget (id 0, no reply ever sent):
//! bridge.call_handler(
//!     "Image.updatePlaceHolder",
//!     vec![Value::from("place_holder.png")],
//!     None,
//! );
//!
//! // Host → page with a continuation (runs at most once, maybe never):
//! bridge.call_handler(
//!     "Page.title",
//!     vec![],
//!     Some(Box::new(|status, result| {
//!         let _ = (status, result);
//!     })),
//! );
//!
//! // Page → host: wire this to your script message handler.
//! bridge.on_receive(r#"[{"id":2,"name":"Image.ViewImage","args":[0],"argsCount":1}]"#);
//! ```
//!
//! ### Setting up the page side
//!
//! Inject [`script::BRIDGE_JS`] into the web view once, at document start.
//! The page then talks to the same protocol:
//!
//! ```text
//! ZHBridge.Core.registerJsHandler("Page.title", function () { return document.title; });
//! ZHBridge.Core.callNativeHandler("Image.ViewImage", [0], onOk, onFail);
//! ```
//!
//! Hosts with a script message channel receive each batch directly. Legacy
//! hosts instead watch for the synthetic `ZHBridge://` navigation and then
//! evaluate [`script::GET_AND_CLEAR_ACTIONS`] to drain the page's queue —
//! [`transport::QueueTransport`] is the same pattern in the other direction.
//!
//! ---
//!
//! ## Threads and the owner loop
//!
//! Every operation that touches the registry, the pending table, or the
//! transport must run on the side's owning thread; the bridge does no
//! internal locking. With the `tokio` feature, [`handle::pair`] splits a
//! bridge into a `Send + Clone` [`handle::BridgeHandle`] and an
//! [`handle::OwnerLoop`] that applies operations in order on the owning task:
//!
//! ```no_run
//! use webview_bridge::{handle, Bridge};
//!
//! # async fn demo() {
//! let (bridge_handle, owner) = handle::pair(Bridge::new());
//!
//! // !Send future: run it where the bridge lives.
//! let local = tokio::task::LocalSet::new();
//! local.spawn_local(owner.run());
//!
//! // Any thread, any task:
//! bridge_handle.call_handler("Page.reload", vec![], None).unwrap();
//! # }
//! ```
//!
//! ---
//!
//! ## Logging
//!
//! The crate logs through `tracing`: dropped elements and stale replies at
//! debug, oversized payloads at warn. Nothing is ever written to the
//! transport itself, so logging cannot corrupt the protocol stream.

pub mod action;
pub mod bridge;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod pending;
pub mod registry;
pub mod script;
pub mod transport;

#[cfg(feature = "tokio")]
pub mod handle;

/// The one type that crosses the boundary: JSON-compatible structured data.
pub use serde_json::Value;

// -------- Core re-exports --------

#[doc(inline)]
pub use action::{pack_actions, pack_result, unpack_actions, unpack_result, Action, ActionResult};
#[doc(inline)]
pub use bridge::{Bridge, BridgeConfig};
#[doc(inline)]
pub use error::BridgeError;
#[doc(inline)]
pub use pending::{PendingCalls, ResultCallback};
#[doc(inline)]
pub use registry::{HandlerRegistry, HandlerResult};
#[doc(inline)]
pub use script::{BRIDGE_JS, MESSAGE_HANDLER_NAME};
#[doc(inline)]
pub use transport::{ChannelTransport, QueueDrain, QueueTransport, Transport};

#[cfg(feature = "tokio")]
#[doc(inline)]
pub use handle::{BridgeHandle, OwnerLoop};
