//! # Player Controller Core
//!
//! Orchestration engine of the streaming media player: pulls compressed
//! access units from a [`Source`], hands them to per-track [`Decoder`]s,
//! forwards decoded buffers to the [`Renderer`], and sequences the life
//! cycle events (start, format change, end of stream, flush, reset) that
//! traverse those stages.
//!
//! ## Overview
//!
//! This crate handles:
//! - Lazy decoder instantiation via the generation-checked source scan loop
//! - The twin per-track flush/shutdown state machines
//! - Discontinuity-driven flushing (with decoder teardown on format change)
//! - Reset sequencing interlocked with in-flight flushes
//! - Listener notification for playback-complete and reset-complete
//!
//! Control flow runs entirely over `core-loop` mailboxes; the controller
//! never blocks and owns every pipeline resource exclusively.

pub mod config;
pub mod controller;
pub mod error;
pub mod traits;

pub use config::PlayerConfig;
pub use controller::{
    DecoderNotifier, FlushStatus, PlayerController, PlayerHandle, PlayerMessage, RendererNotifier,
};
pub use error::{DiscontinuityKind, Result, SinkError, StreamError};
pub use traits::{
    AudioCodec, AudioFormat, AudioSink, Decoder, DecoderEvent, DecoderFactory, DrainReply,
    InputReply, MediaBuffer, MediaFormat, PerTrack, Renderer, RendererEvent, RendererFactory,
    Source, Track, VideoCodec, VideoFormat, VideoSurface,
};
