//! The script-context half of the bridge, shipped as a static asset.
//!
//! The host injects [`BRIDGE_JS`] into the web view once at setup time. The
//! script installs `ZHBridge.Core` with the entry points the native side
//! drives (`callJsHandler`, `callbackJs`, `getAndClearJsActions`) and the
//! page-facing API (`registerJsHandler`, `callNativeHandler`, `ready`). Both
//! directions speak JSON text; the helpers here build the JS expressions a
//! web-view transport evaluates to deliver a payload.

/// Name of the script message handler the injected core posts batches to.
pub const MESSAGE_HANDLER_NAME: &str = "ZHBridge";

/// Scheme of the synthetic navigation fired when no message channel exists.
/// Hosts on the polling path watch for it and then drain the action queue.
pub const BRIDGE_SCHEME: &str = "ZHBridge";

/// The bridge core injected into the script context.
pub const BRIDGE_JS: &str = include_str!("bridge.js");

/// JS expression delivering an encoded call-info payload to the script-side
/// handler entry point. `payload` must be JSON text; it is spliced in as a
/// literal.
pub fn call_js_handler(payload: &str) -> String {
    format!("ZHBridge.Core.callJsHandler({payload})")
}

/// JS expression delivering an encoded reply payload to the script-side
/// callback entry point.
pub fn callback_js(payload: &str) -> String {
    format!("ZHBridge.Core.callbackJs({payload})")
}

/// JS expression collecting and clearing the queued actions on a polling
/// host. Evaluates to a JSON array of action objects.
pub const GET_AND_CLEAR_ACTIONS: &str = "ZHBridge.Core.getAndClearJsActions()";
