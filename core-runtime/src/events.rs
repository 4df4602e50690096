//! # Player Event Surface
//!
//! The player core reports upward through a narrow, typed event surface.
//! The owner registers an [`EventListener`]; the core keeps only a
//! [`ListenerRef`], a non-owning handle, so a client that dropped its
//! listener never has its lifetime extended by the pipeline — deliveries
//! are silently discarded instead.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use core_runtime::events::{EventListener, ListenerRef, PlayerEvent};
//!
//! struct PrintListener;
//!
//! impl EventListener for PrintListener {
//!     fn send_event(&self, event: PlayerEvent, ext1: i32, ext2: i32) {
//!         println!("{}: ({ext1}, {ext2})", event.description());
//!     }
//! }
//!
//! let listener: Arc<dyn EventListener> = Arc::new(PrintListener);
//! let sink = ListenerRef::new(&listener);
//! sink.notify(PlayerEvent::PlaybackComplete, 0, 0);
//!
//! drop(listener);
//! // The owner is gone; this delivery is dropped silently.
//! sink.notify(PlayerEvent::ResetComplete, 0, 0);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use tracing::trace;

// ============================================================================
// Events
// ============================================================================

/// Events the player core surfaces to its owner.
///
/// These are semantic milestones, not error codes: failures inside the
/// pipeline are either absorbed by the state machine or treated as defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PlayerEvent {
    /// Every track reached end of stream, or no track ever existed.
    PlaybackComplete,
    /// A reset finished: decoders, renderer and source are gone.
    ResetComplete,
}

impl PlayerEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            PlayerEvent::PlaybackComplete => "Playback completed",
            PlayerEvent::ResetComplete => "Reset completed",
        }
    }
}

// ============================================================================
// Listener
// ============================================================================

/// Upward notification channel implemented by the player's owner.
pub trait EventListener: Send + Sync {
    /// Delivers one event with two event-specific extras.
    fn send_event(&self, event: PlayerEvent, ext1: i32, ext2: i32);
}

/// Non-owning handle to an [`EventListener`].
///
/// The player must never keep its owner alive; once the owner drops the
/// listener, every subsequent delivery is discarded.
pub struct ListenerRef {
    inner: Option<Weak<dyn EventListener>>,
}

impl ListenerRef {
    /// Wraps a weak reference to the owner's listener.
    pub fn new(listener: &Arc<dyn EventListener>) -> Self {
        Self {
            inner: Some(Arc::downgrade(listener)),
        }
    }

    /// A reference that was never connected; every delivery is dropped.
    pub fn disconnected() -> Self {
        Self { inner: None }
    }

    /// Returns `true` while the owning listener is still alive.
    pub fn is_connected(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Delivers the event if the owner is still alive.
    pub fn notify(&self, event: PlayerEvent, ext1: i32, ext2: i32) {
        let Some(weak) = &self.inner else {
            return;
        };
        match weak.upgrade() {
            Some(listener) => listener.send_event(event, ext1, ext2),
            None => trace!(event = event.description(), "listener gone, dropping event"),
        }
    }
}

impl fmt::Debug for ListenerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRef")
            .field("connected", &self.is_connected())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        events: Mutex<Vec<(PlayerEvent, i32, i32)>>,
    }

    impl EventListener for RecordingListener {
        fn send_event(&self, event: PlayerEvent, ext1: i32, ext2: i32) {
            self.events.lock().unwrap().push((event, ext1, ext2));
        }
    }

    #[test]
    fn notify_reaches_a_live_listener() {
        let recorder = Arc::new(RecordingListener::default());
        let listener: Arc<dyn EventListener> = recorder.clone();
        let sink = ListenerRef::new(&listener);

        sink.notify(PlayerEvent::PlaybackComplete, 0, 0);

        let events = recorder.events.lock().unwrap();
        assert_eq!(*events, vec![(PlayerEvent::PlaybackComplete, 0, 0)]);
    }

    #[test]
    fn notify_after_owner_drop_is_silent() {
        let recorder = Arc::new(RecordingListener::default());
        let listener: Arc<dyn EventListener> = recorder.clone();
        let sink = ListenerRef::new(&listener);

        drop(listener);
        drop(recorder);
        assert!(!sink.is_connected());

        // Must not panic and must not deliver anywhere.
        sink.notify(PlayerEvent::ResetComplete, 0, 0);
    }

    #[test]
    fn disconnected_ref_drops_everything() {
        let sink = ListenerRef::disconnected();
        assert!(!sink.is_connected());
        sink.notify(PlayerEvent::PlaybackComplete, 0, 0);
    }

    #[test]
    fn event_serialization_round_trips() {
        let event = PlayerEvent::ResetComplete;
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ResetComplete"));

        let back: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn event_descriptions() {
        assert_eq!(
            PlayerEvent::PlaybackComplete.description(),
            "Playback completed"
        );
        assert_eq!(PlayerEvent::ResetComplete.description(), "Reset completed");
    }
}
