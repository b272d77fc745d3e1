// Not every test binary uses every helper here.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use webview_bridge::{Bridge, ChannelTransport};

/// In-memory inbox standing in for one side's receive channel.
#[derive(Clone, Default)]
pub struct Inbox {
    payloads: Rc<RefCell<Vec<String>>>,
}

impl Inbox {
    pub fn push(&self, payload: &str) {
        self.payloads.borrow_mut().push(payload.to_owned());
    }

    pub fn drain(&self) -> Vec<String> {
        self.payloads.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.payloads.borrow().len()
    }
}

/// Two bridges wired so each sends into an inbox destined for the other.
///
/// Delivery is manual: payloads sit in the inboxes until `pump` moves them
/// across, the way a real event loop would. This keeps tests in control of
/// interleaving and avoids synchronous re-entry into the sending bridge.
pub struct Loopback {
    pub host: Bridge,
    pub page: Bridge,
    pub host_out: Inbox,
    pub page_out: Inbox,
}

impl Loopback {
    pub fn new() -> Self {
        let host = Bridge::new();
        let page = Bridge::new();
        let host_out = Inbox::default();
        let page_out = Inbox::default();

        let sink = host_out.clone();
        host.attach(ChannelTransport::new(move |payload: &str| sink.push(payload)));
        let sink = page_out.clone();
        page.attach(ChannelTransport::new(move |payload: &str| sink.push(payload)));

        Self {
            host,
            page,
            host_out,
            page_out,
        }
    }

    /// Deliver queued payloads in both directions until both inboxes stay
    /// empty (a reply can trigger a follow-up call, so loop to quiescence).
    pub fn pump(&self) {
        loop {
            let to_page = self.host_out.drain();
            let to_host = self.page_out.drain();
            if to_page.is_empty() && to_host.is_empty() {
                break;
            }
            for payload in to_page {
                self.page.on_receive(&payload);
            }
            for payload in to_host {
                self.host.on_receive(&payload);
            }
        }
    }
}
