mod common;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use webview_bridge::{Bridge, ChannelTransport, QueueTransport, Transport};

#[test]
fn queue_preserves_send_order_and_drains_empty() {
    let wakes = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&wakes);
    let mut transport = QueueTransport::new(move || *counter.borrow_mut() += 1);
    let drain = transport.drain_handle();

    transport.send("first");
    transport.send("second");
    transport.send("third");

    assert_eq!(*wakes.borrow(), 3, "one wake signal per send");
    assert_eq!(drain.drain(), ["first", "second", "third"]);
    assert!(drain.is_empty());
    assert!(drain.drain().is_empty(), "drain leaves the queue empty");

    transport.send("fourth");
    assert_eq!(drain.drain(), ["fourth"]);
}

#[test]
fn channel_transport_passes_payloads_through_unchanged() {
    let inbox = common::Inbox::default();
    let sink = inbox.clone();
    let mut transport = ChannelTransport::new(move |payload: &str| sink.push(payload));

    transport.send(r#"{"id":1}"#);
    transport.send("plain");
    assert_eq!(inbox.drain(), [r#"{"id":1}"#, "plain"]);
}

#[test]
fn polling_roundtrip_through_a_queue_transport() {
    // Host side sends through a queue; the "page" polls it on each wake, the
    // way a legacy host drains the action queue after the navigation nudge.
    let host = Bridge::new();
    let page = Bridge::new();

    let transport = QueueTransport::new(|| {});
    let to_page = transport.drain_handle();
    host.attach(transport);

    let to_host = common::Inbox::default();
    let sink = to_host.clone();
    page.attach(ChannelTransport::new(move |payload: &str| sink.push(payload)));

    page.register_handler("Sum", |args| {
        let total: i64 = args.iter().filter_map(|v| v.as_i64()).sum();
        (true, Some(json!(total)))
    });

    let result = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&result);
    host.call_handler(
        "Sum",
        vec![json!(20), json!(22)],
        Some(Box::new(move |status, value| {
            *slot.borrow_mut() = Some((status, value));
        })),
    );
    host.call_handler("Sum", vec![json!(0)], None);

    // Poll: two queued batches, delivered in order.
    let batches = to_page.drain();
    assert_eq!(batches.len(), 2);
    for batch in batches {
        page.on_receive(&batch);
    }

    // Only the correlated call produced a reply.
    let replies = to_host.drain();
    assert_eq!(replies.len(), 1);
    for reply in replies {
        host.on_receive(&reply);
    }

    assert_eq!(*result.borrow(), Some((true, Some(json!(42)))));
    assert_eq!(host.pending_calls(), 0);
}
