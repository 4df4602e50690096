//! FIFO mailboxes and the dispatch loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::handler::Handler;

/// Creates a connected sink/mailbox pair.
///
/// Use this directly when the mailbox is drained by hand (tests, embedding
/// into an existing loop); use [`Looper::spawn`] to get a dispatch task.
pub fn mailbox<M: Send + 'static>() -> (MessageSink<M>, Mailbox<M>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MessageSink { tx }, Mailbox { rx })
}

// ============================================================================
// MessageSink
// ============================================================================

/// Posting side of a mailbox.
///
/// Cheap to clone; held by peers and by the owning handler itself for
/// self-posts. Senders hold no ownership over the receiver's lifetime:
/// posting to a stopped loop silently drops the message.
pub struct MessageSink<M> {
    tx: mpsc::UnboundedSender<M>,
}

impl<M> Clone for MessageSink<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M: Send + 'static> MessageSink<M> {
    /// Enqueues a message at the tail of the mailbox.
    pub fn post(&self, msg: M) {
        if self.tx.send(msg).is_err() {
            trace!("message dropped: mailbox closed");
        }
    }

    /// Enqueues a message once `delay` has elapsed.
    ///
    /// The message lands behind everything already in the mailbox at that
    /// point: ordering follows posting time plus scheduled delay.
    pub fn post_delayed(&self, msg: M, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(msg).is_err() {
                trace!("delayed message dropped: mailbox closed");
            }
        });
    }

    /// Returns `true` once the receiving mailbox is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ============================================================================
// Mailbox
// ============================================================================

/// Receiving side of a mailbox. Messages come out in FIFO order.
pub struct Mailbox<M> {
    rx: mpsc::UnboundedReceiver<M>,
}

impl<M> Mailbox<M> {
    /// Awaits the next message; `None` once every sink has been dropped.
    pub async fn recv(&mut self) -> Option<M> {
        self.rx.recv().await
    }

    /// Takes the next already-queued message without waiting.
    pub fn try_next(&mut self) -> Option<M> {
        self.rx.try_recv().ok()
    }
}

// ============================================================================
// Looper
// ============================================================================

/// Drives a [`Handler`] from its mailbox on a spawned task.
///
/// The task dispatches strictly one message at a time and ends when either
/// [`Looper::stop`] is called or every [`MessageSink`] has been dropped.
pub struct Looper {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Looper {
    /// Creates a mailbox and spawns `handler` behind it.
    pub fn spawn<H: Handler>(handler: H) -> (MessageSink<H::Message>, Looper) {
        let (sink, mbox) = mailbox();
        let looper = Self::spawn_with(mbox, handler);
        (sink, looper)
    }

    /// Spawns `handler` behind an existing mailbox.
    pub fn spawn_with<H: Handler>(mut mbox: Mailbox<H::Message>, mut handler: H) -> Looper {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    msg = mbox.recv() => match msg {
                        Some(msg) => handler.handle(msg).await,
                        None => break,
                    },
                }
            }
            debug!("looper finished");
        });
        Looper { cancel, task }
    }

    /// Asks the dispatch task to stop after the in-flight message.
    ///
    /// Messages still queued at that point are dropped with the mailbox.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stops the loop and waits for the dispatch task to finish.
    pub async fn join(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mailbox_preserves_posting_order() {
        let (sink, mut mbox) = mailbox();
        for i in 0..10u32 {
            sink.post(i);
        }
        for i in 0..10u32 {
            assert_eq!(mbox.try_next(), Some(i));
        }
        assert_eq!(mbox.try_next(), None);
    }

    #[tokio::test]
    async fn sink_reports_closed_after_mailbox_drop() {
        let (sink, mbox) = mailbox::<u32>();
        assert!(!sink.is_closed());
        drop(mbox);
        assert!(sink.is_closed());
        // Must not panic.
        sink.post(7);
    }
}
