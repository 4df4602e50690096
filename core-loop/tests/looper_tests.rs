//! Integration tests for the message loop primitive.
//!
//! These verify the guarantees the player core builds on: FIFO dispatch,
//! posting-time-plus-delay ordering for delayed messages, and clean
//! shutdown semantics.

use std::time::Duration;

use core_loop::{mailbox, Handler, Looper, MessageSink};
use tokio::sync::mpsc;

// ============================================================================
// Test handler
// ============================================================================

/// Forwards every received message to a channel the test holds.
struct Forwarder {
    out: mpsc::UnboundedSender<u32>,
}

#[async_trait::async_trait]
impl Handler for Forwarder {
    type Message = u32;

    async fn handle(&mut self, msg: u32) {
        self.out.send(msg).ok();
    }
}

fn forwarder() -> (Forwarder, mpsc::UnboundedReceiver<u32>) {
    let (out, seen) = mpsc::unbounded_channel();
    (Forwarder { out }, seen)
}

async fn collect(seen: &mut mpsc::UnboundedReceiver<u32>, count: usize) -> Vec<u32> {
    let mut got = Vec::with_capacity(count);
    for _ in 0..count {
        got.push(seen.recv().await.expect("dispatch loop dropped a message"));
    }
    got
}

// ============================================================================
// FIFO dispatch
// ============================================================================

#[tokio::test]
async fn dispatch_is_fifo() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    for i in 0..100u32 {
        sink.post(i);
    }

    let got = collect(&mut seen, 100).await;
    assert_eq!(got, (0..100).collect::<Vec<_>>());

    looper.join().await;
}

#[tokio::test]
async fn sinks_can_be_cloned_across_tasks() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    let mut tasks = Vec::new();
    for base in [0u32, 100, 200] {
        let sink: MessageSink<u32> = sink.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..10 {
                sink.post(base + i);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut got = collect(&mut seen, 30).await;
    got.sort_unstable();
    let mut expected: Vec<u32> = (0..10).chain(100..110).chain(200..210).collect();
    expected.sort_unstable();
    assert_eq!(got, expected);

    looper.join().await;
}

// ============================================================================
// Delayed posting
// ============================================================================

#[tokio::test(start_paused = true)]
async fn delayed_post_lands_behind_immediate_posts() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    sink.post_delayed(1, Duration::from_millis(50));
    sink.post(2);
    sink.post(3);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let got = collect(&mut seen, 3).await;
    assert_eq!(got, vec![2, 3, 1]);

    looper.join().await;
}

#[tokio::test(start_paused = true)]
async fn delayed_posts_order_by_deadline() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    sink.post_delayed(1, Duration::from_millis(200));
    sink.post_delayed(2, Duration::from_millis(50));
    sink.post_delayed(3, Duration::from_millis(120));

    tokio::time::sleep(Duration::from_millis(300)).await;

    let got = collect(&mut seen, 3).await;
    assert_eq!(got, vec![2, 3, 1]);

    looper.join().await;
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn stop_halts_dispatch() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    sink.post(1);
    // Let the in-flight message drain before stopping.
    tokio::time::sleep(Duration::from_millis(10)).await;
    looper.join().await;

    sink.post(2);
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(seen.recv().await, Some(1));
    assert!(seen.try_recv().is_err(), "message dispatched after stop");
    assert!(sink.is_closed());
}

#[tokio::test]
async fn loop_ends_when_all_sinks_drop() {
    let (handler, mut seen) = forwarder();
    let (sink, looper) = Looper::spawn(handler);

    sink.post(42);
    drop(sink);

    // With every sink gone the mailbox closes and the task finishes on its
    // own; join must not hang.
    looper.join().await;
    assert_eq!(seen.recv().await, Some(42));
}

// ============================================================================
// Manual draining
// ============================================================================

#[tokio::test]
async fn mailbox_can_be_drained_by_hand() {
    let (sink, mut mbox) = mailbox::<u32>();
    sink.post(5);
    sink.post(6);

    assert_eq!(mbox.recv().await, Some(5));
    assert_eq!(mbox.try_next(), Some(6));
    assert_eq!(mbox.try_next(), None);
}
