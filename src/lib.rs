//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the
//! individual workspace crates (`core-loop`, `core-runtime`,
//! `core-playback`). Host applications can depend on `smp-workspace` and
//! enable the documented features without needing to wire each crate
//! individually.

#[cfg(feature = "message-loop")]
pub use core_loop;

#[cfg(feature = "runtime")]
pub use core_runtime;

#[cfg(feature = "playback")]
pub use core_playback;
