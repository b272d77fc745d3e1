#![cfg(feature = "tokio")]

mod common;

use std::sync::mpsc;

use serde_json::{json, Value};
use webview_bridge::{handle, Bridge, BridgeError, ChannelTransport};

#[tokio::test]
async fn ops_apply_in_order_on_the_owner_task() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let bridge = Bridge::new();
            let outbox = common::Inbox::default();
            let sink = outbox.clone();
            bridge.attach(ChannelTransport::new(move |payload: &str| sink.push(payload)));

            let (bridge_handle, owner) = handle::pair(bridge);
            let owner_task = tokio::task::spawn_local(owner.run());

            bridge_handle
                .register_handler("Page.title", |_args: &[Value]| (true, Some(json!("Home"))))
                .unwrap();
            bridge_handle
                .deliver(r#"[{"id": 4, "name": "Page.title", "args": [], "argsCount": 0}]"#)
                .unwrap();

            let (tx, rx) = mpsc::channel();
            bridge_handle
                .call_handler(
                    "Remote.thing",
                    vec![json!(1)],
                    Some(Box::new(move |status, result| {
                        let _ = tx.send((status, result));
                    })),
                )
                .unwrap();

            bridge_handle.teardown().unwrap();
            owner_task.await.unwrap();

            // Ops ran in enqueue order: the delivered batch hit the handler
            // registered just before it, then the outgoing call went out.
            let sent = outbox.drain();
            assert_eq!(sent.len(), 2, "one reply + one outgoing call batch");
            assert!(sent[0].contains("\"id\":4"));
            assert!(sent[0].contains("Home"));
            assert!(sent[1].contains("Remote.thing"));

            // No reply ever arrived for the outgoing call before teardown:
            // the continuation was abandoned, not failed.
            assert!(rx.try_recv().is_err());

            // The loop is gone: every further op reports Detached.
            assert!(matches!(
                bridge_handle.remove_handler("Page.title"),
                Err(BridgeError::Detached)
            ));
            assert!(matches!(
                bridge_handle.deliver("{}"),
                Err(BridgeError::Detached)
            ));
        })
        .await;
}

#[tokio::test]
async fn handles_marshal_from_other_threads() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let bridge = Bridge::new();
            let outbox = common::Inbox::default();
            let sink = outbox.clone();
            bridge.attach(ChannelTransport::new(move |payload: &str| sink.push(payload)));

            let (bridge_handle, owner) = handle::pair(bridge);
            let owner_task = tokio::task::spawn_local(owner.run());

            // The bridge itself never leaves the owner task; only the handle
            // crosses the thread boundary.
            let worker = bridge_handle.clone();
            std::thread::spawn(move || {
                worker
                    .register_handler("Thread.echo", |args: &[Value]| (true, args.first().cloned()))
                    .unwrap();
            })
            .join()
            .unwrap();

            bridge_handle
                .deliver(r#"[{"id": 9, "name": "Thread.echo", "args": ["hi"], "argsCount": 1}]"#)
                .unwrap();
            bridge_handle.teardown().unwrap();
            owner_task.await.unwrap();

            let sent = outbox.drain();
            assert_eq!(sent.len(), 1);
            assert!(sent[0].contains("\"id\":9"));
            assert!(sent[0].contains("hi"));
        })
        .await;
}
