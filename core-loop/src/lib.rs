//! # Message Loop Primitive
//!
//! FIFO message dispatch for the player core. Every stateful component of
//! the pipeline is a [`Handler`] driven from its own [`Mailbox`]; peers
//! interact exclusively by posting messages through [`MessageSink`] handles.
//!
//! ## Model
//!
//! ```text
//! ┌──────────┐  post / post_delayed   ┌─────────┐   recv    ┌─────────┐
//! │ any peer ├───────────────────────>│ Mailbox ├──────────>│ Handler │
//! └──────────┘                        │ (FIFO)  │  one at   │ (&mut)  │
//!                                     └─────────┘  a time   └─────────┘
//! ```
//!
//! A handler processes one message at a time, so its state needs no
//! synchronization; there is no preemption and no shared mutable state
//! across handlers. Delayed posting orders messages by posting time plus
//! scheduled delay, which is what retry loops build on.
//!
//! ## Usage
//!
//! ```rust
//! use core_loop::{Handler, Looper};
//!
//! struct Counter {
//!     total: u64,
//! }
//!
//! #[async_trait::async_trait]
//! impl Handler for Counter {
//!     type Message = u64;
//!
//!     async fn handle(&mut self, msg: u64) {
//!         self.total += msg;
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (sink, looper) = Looper::spawn(Counter { total: 0 });
//! sink.post(1);
//! sink.post(2);
//! drop(sink);
//! looper.join().await;
//! # }
//! ```

pub mod handler;
pub mod looper;

pub use handler::Handler;
pub use looper::{mailbox, Looper, Mailbox, MessageSink};
