//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the player core:
//! - Logging and tracing configuration
//! - The typed player event surface and its non-owning listener channel
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the playback crates depend on.
//! It establishes the logging conventions and the upward event channel used
//! throughout the system; the message loop itself lives in `core-loop`.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{EventListener, ListenerRef, PlayerEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
