//! Per-side handler lookup table.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

/// Outcome of a handler: success flag plus the value to hand back, if any.
pub type HandlerResult = (bool, Option<Value>);

/// A registered handler.
///
/// Handlers must not panic: the wire has no representation for a native
/// fault, so a handler converts its own internal failures into a `false`
/// status before returning.
pub type Handler = Rc<dyn Fn(&[Value]) -> HandlerResult>;

/// Name → handler table, one per bridge side.
///
/// Purely a lookup table; the dispatcher resolves names through it and
/// nothing ever enumerates it. Interior mutability keeps every operation at
/// `&self` so a handler may re-register or unregister mid-dispatch.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RefCell<HashMap<String, Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handler. Registering a second handler under an existing name
    /// replaces the first, without error.
    pub fn register<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[Value]) -> HandlerResult + 'static,
    {
        self.handlers.borrow_mut().insert(name.into(), Rc::new(handler));
    }

    /// Remove a handler if present. Removing an unknown name is a no-op.
    pub fn unregister(&self, name: &str) {
        self.handlers.borrow_mut().remove(name);
    }

    /// Look up a handler by name.
    ///
    /// Returns a clone of the shared handler so no borrow of the table is
    /// held while the handler runs.
    pub fn resolve(&self, name: &str) -> Option<Handler> {
        self.handlers.borrow().get(name).cloned()
    }
}
