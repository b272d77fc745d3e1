//! Delivery of encoded payloads to the peer side.
//!
//! The protocol only asks one thing of a transport: strings handed to
//! [`Transport::send`] reach the peer exactly once, in `send` order. How they
//! get there is the adapter's business. Two adapters cover the two host API
//! shapes found in practice: a direct message channel, and a legacy queue the
//! peer polls after a wake signal.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One-way, ordered, fire-and-forget delivery of an encoded payload.
///
/// `send` must not block and must not deliver re-entrantly into the sending
/// bridge; hand the payload to the peer's own scheduler or queue instead.
/// Delivery guarantees beyond ordering are the transport's responsibility.
/// A payload that never arrives simply leaves its call unresolved.
pub trait Transport {
    fn send(&mut self, payload: &str);
}

/// Adapter for hosts with a direct message channel to the peer.
///
/// Each payload is posted straight through the sink the embedder supplied at
/// setup time (an `evaluateJavaScript`-style call, a channel sender, a test
/// inbox).
pub struct ChannelTransport {
    sink: Box<dyn FnMut(&str)>,
}

impl ChannelTransport {
    pub fn new(sink: impl FnMut(&str) + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, payload: &str) {
        (self.sink)(payload);
    }
}

/// Adapter for legacy hosts that cannot push to the peer directly.
///
/// Payloads accumulate in a FIFO queue. Each `send` fires the wake signal
/// (the counterpart of the synthetic `ZHBridge://` navigation a polling host
/// watches for) and the peer later collects everything at once through a
/// [`QueueDrain`].
pub struct QueueTransport {
    queue: Rc<RefCell<VecDeque<String>>>,
    wake: Box<dyn FnMut()>,
}

impl QueueTransport {
    pub fn new(wake: impl FnMut() + 'static) -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            wake: Box::new(wake),
        }
    }

    /// Handle for the draining side. Clones share the same queue.
    pub fn drain_handle(&self) -> QueueDrain {
        QueueDrain {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl Transport for QueueTransport {
    fn send(&mut self, payload: &str) {
        self.queue.borrow_mut().push_back(payload.to_owned());
        (self.wake)();
    }
}

/// Draining side of a [`QueueTransport`].
#[derive(Clone)]
pub struct QueueDrain {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl QueueDrain {
    /// Take every queued payload, oldest first, leaving the queue empty.
    pub fn drain(&self) -> Vec<String> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
