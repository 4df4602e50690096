//! Message handler trait.

use async_trait::async_trait;

/// A recipient of mailbox messages.
///
/// A handler owns its state exclusively: the [`Looper`](crate::Looper)
/// drives it one message at a time, so `handle` never overlaps with itself
/// and the handler's fields need no locking. Components never call each
/// other directly; everything crosses a [`MessageSink`](crate::MessageSink).
#[async_trait]
pub trait Handler: Send + 'static {
    /// The closed message set this handler accepts.
    type Message: Send + 'static;

    /// Processes one message.
    ///
    /// Must not block the thread. Work that depends on a future condition
    /// is expressed as a message posted back when that condition occurs.
    async fn handle(&mut self, msg: Self::Message);
}
