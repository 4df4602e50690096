//! # Pipeline Collaborator Traits
//!
//! Interfaces the player controller consumes. The controller owns one
//! [`Source`], up to one [`Decoder`] per track, and one [`Renderer`]; data
//! flows source → decoder → renderer while control flows back to the
//! controller as posted events.
//!
//! ```text
//! ┌────────┐ access units ┌─────────┐ decoded buffers ┌──────────┐
//! │ Source ├─────────────>│ Decoder ├────────────────>│ Renderer │
//! └────────┘              └────┬────┘                 └────┬─────┘
//!                              │ DecoderEvent              │ RendererEvent
//!                              └───────────┬───────────────┘
//!                                          ▼
//!                                    controller mailbox
//! ```
//!
//! Every operation here is non-blocking: either it is fire-and-forget (the
//! outcome arrives later as an event), or it answers immediately with a
//! would-block result. Buffers are reference-counted [`bytes::Bytes`]
//! payloads so they cross mailboxes without copying.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::controller::{DecoderNotifier, RendererNotifier};
use crate::error::{Result, SinkError, StreamError};

// ============================================================================
// Tracks
// ============================================================================

/// Identifies one elementary stream of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Audio,
    Video,
}

impl Track {
    /// The opposite track.
    pub fn peer(self) -> Track {
        match self {
            Track::Audio => Track::Video,
            Track::Video => Track::Audio,
        }
    }

    /// Returns `true` for the audio track.
    pub fn is_audio(self) -> bool {
        matches!(self, Track::Audio)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Track::Audio => "audio",
            Track::Video => "video",
        })
    }
}

/// A pair of values indexed by [`Track`].
///
/// Audio and video share one state machine; this keeps the per-track halves
/// addressable without duplicating fields pair-by-pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerTrack<T> {
    pub audio: T,
    pub video: T,
}

impl<T> PerTrack<T> {
    /// Borrows the slot for `track`.
    pub fn get(&self, track: Track) -> &T {
        match track {
            Track::Audio => &self.audio,
            Track::Video => &self.video,
        }
    }

    /// Mutably borrows the slot for `track`.
    pub fn get_mut(&mut self, track: Track) -> &mut T {
        match track {
            Track::Audio => &mut self.audio,
            Track::Video => &mut self.video,
        }
    }
}

impl<T> Index<Track> for PerTrack<T> {
    type Output = T;

    fn index(&self, track: Track) -> &T {
        self.get(track)
    }
}

impl<T> IndexMut<Track> for PerTrack<T> {
    fn index_mut(&mut self, track: Track) -> &mut T {
        self.get_mut(track)
    }
}

// ============================================================================
// Buffers
// ============================================================================

/// One timestamped media payload.
///
/// Compressed access units and decoded frames share this shape; the payload
/// is reference counted so it can flow through the pipeline without copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBuffer {
    /// Raw payload bytes.
    pub data: Bytes,
    /// Presentation timestamp in microseconds.
    pub pts_us: i64,
}

impl MediaBuffer {
    /// Creates a buffer from payload bytes and a timestamp.
    pub fn new(data: impl Into<Bytes>, pts_us: i64) -> Self {
        Self {
            data: data.into(),
            pts_us,
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ============================================================================
// Format metadata
// ============================================================================

/// Audio codec identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Aac,
    Mp3,
    Opus,
    Vorbis,
    /// Vendor- or container-specific codec.
    Other(String),
}

/// Video codec identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    Avc,
    Hevc,
    Vp9,
    /// Vendor- or container-specific codec.
    Other(String),
}

/// Decoder configuration for an audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Codec identifier.
    pub codec: AudioCodec,
    /// Sample rate in hertz.
    pub sample_rate: u32,
    /// Number of audio channels.
    pub channels: u16,
}

/// Decoder configuration for a video track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFormat {
    /// Codec identifier.
    pub codec: VideoCodec,
    /// Coded width in pixels.
    pub width: u32,
    /// Coded height in pixels.
    pub height: u32,
}

/// Format metadata a source advertises for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "track", rename_all = "lowercase")]
pub enum MediaFormat {
    Audio(AudioFormat),
    Video(VideoFormat),
}

impl MediaFormat {
    /// The track this format describes.
    pub fn track(&self) -> Track {
        match self {
            MediaFormat::Audio(_) => Track::Audio,
            MediaFormat::Video(_) => Track::Video,
        }
    }
}

// ============================================================================
// Reply channels
// ============================================================================

/// Reply channel for a decoder's input request.
///
/// Carries either one access unit or the condition that ended the request
/// (discontinuity, end of stream, source failure). Never a would-block —
/// starvation is expressed by retrying the request instead.
pub type InputReply = oneshot::Sender<Result<MediaBuffer>>;

/// Reply channel the renderer fires once a decoded buffer was consumed,
/// letting the decoder recycle it.
pub type DrainReply = oneshot::Sender<()>;

// ============================================================================
// Source (C1)
// ============================================================================

/// Lazy supplier of format metadata and timestamped access units.
///
/// Sources may discover tracks mid-stream (a transport stream parser finds
/// elementary streams as packets arrive), so `format` can return `None`
/// long after `start`; the controller keeps rescanning until every track
/// either appears or the input runs dry.
pub trait Source: Send {
    /// Begins producing data.
    fn start(&mut self);

    /// Format metadata for `track`, once known.
    fn format(&self, track: Track) -> Option<MediaFormat>;

    /// Gives the source a chance to buffer more input.
    ///
    /// Returns `false` once no further data will ever become available.
    fn feed_more(&mut self) -> bool;

    /// Takes the next access unit for `track`.
    ///
    /// # Errors
    ///
    /// [`StreamError::WouldBlock`] when nothing is buffered right now,
    /// [`StreamError::Discontinuity`] at a stream boundary,
    /// [`StreamError::EndOfStream`] once the track is exhausted.
    fn dequeue_access_unit(&mut self, track: Track) -> Result<MediaBuffer>;
}

// ============================================================================
// Decoder (C2)
// ============================================================================

/// Notifications a decoder posts to the controller.
#[derive(Debug)]
pub enum DecoderEvent {
    /// The decoder wants one access unit of input.
    FillThisBuffer { reply: InputReply },
    /// The decoder offers one decoded buffer.
    DrainThisBuffer { buffer: MediaBuffer, reply: DrainReply },
    /// The decoder ran out of input; `error` is the terminating condition.
    Eos { error: StreamError },
    /// A previously signalled flush finished.
    FlushCompleted,
    /// A previously initiated shutdown finished.
    ShutdownCompleted,
    /// Decoded audio parameters changed (audio decoders only).
    OutputFormatChanged { channel_count: u16, sample_rate: u32 },
}

impl DecoderEvent {
    /// Variant name for logging.
    pub fn label(&self) -> &'static str {
        match self {
            DecoderEvent::FillThisBuffer { .. } => "FillThisBuffer",
            DecoderEvent::DrainThisBuffer { .. } => "DrainThisBuffer",
            DecoderEvent::Eos { .. } => "Eos",
            DecoderEvent::FlushCompleted => "FlushCompleted",
            DecoderEvent::ShutdownCompleted => "ShutdownCompleted",
            DecoderEvent::OutputFormatChanged { .. } => "OutputFormatChanged",
        }
    }
}

/// Adapter over one platform codec.
///
/// All operations are fire-and-forget; outcomes arrive as [`DecoderEvent`]s
/// through the notifier the decoder was constructed with.
pub trait Decoder: Send {
    /// Applies format metadata before decoding starts.
    fn configure(&mut self, format: &MediaFormat);

    /// Discards buffered data; the decoder answers with
    /// [`DecoderEvent::FlushCompleted`].
    fn signal_flush(&mut self);

    /// Resumes requesting input after a completed flush.
    fn signal_resume(&mut self);

    /// Begins teardown; the decoder answers with
    /// [`DecoderEvent::ShutdownCompleted`].
    fn initiate_shutdown(&mut self);
}

/// Creates decoders on demand as the source advertises tracks.
pub trait DecoderFactory: Send + Sync {
    /// Builds a decoder that reports through `notify`.
    ///
    /// `surface` is the video output target; `None` for audio decoders and
    /// for video decoders created before a surface was supplied.
    fn create_decoder(
        &self,
        notify: DecoderNotifier,
        surface: Option<Arc<dyn VideoSurface>>,
    ) -> Box<dyn Decoder>;
}

// ============================================================================
// Renderer (C3)
// ============================================================================

/// Notifications the renderer posts to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererEvent {
    /// The renderer played out the last buffer of `track`.
    Eos { track: Track },
    /// The renderer finished flushing `track`.
    FlushComplete { track: Track },
}

/// Schedules decoded buffers for presentation.
pub trait Renderer: Send {
    /// Queues one decoded buffer; `reply` fires once it was consumed.
    fn queue_buffer(&mut self, track: Track, buffer: MediaBuffer, reply: DrainReply);

    /// Marks `track` as ended with the terminating condition.
    fn queue_eos(&mut self, track: Track, error: StreamError);

    /// Drops everything queued for `track`.
    fn flush(&mut self, track: Track);

    /// Tells the renderer that upcoming timestamps are not contiguous with
    /// prior ones.
    fn signal_time_discontinuity(&mut self);

    /// Tells the renderer the audio sink was reopened.
    fn signal_audio_sink_changed(&mut self);
}

/// Creates the renderer when playback starts.
pub trait RendererFactory: Send + Sync {
    /// Builds a renderer over `audio_sink` that reports through `notify`.
    fn create_renderer(
        &self,
        audio_sink: Option<Arc<dyn AudioSink>>,
        notify: RendererNotifier,
    ) -> Box<dyn Renderer>;
}

// ============================================================================
// Output targets
// ============================================================================

/// Platform audio output, opened per decoded PCM format.
pub trait AudioSink: Send + Sync {
    /// Opens the device for the given PCM parameters.
    fn open(&self, sample_rate: u32, channel_count: u16) -> std::result::Result<(), SinkError>;

    /// Starts playout.
    fn start(&self);

    /// Closes the device.
    fn close(&self);
}

/// Opaque video output target supplied by the client.
///
/// The controller never looks inside; it only hands the surface to video
/// decoders at construction time.
pub trait VideoSurface: Send + Sync + fmt::Debug {}

// ============================================================================
// Tests
// ============================================================================
