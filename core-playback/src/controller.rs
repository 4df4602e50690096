//! # Player Controller
//!
//! The orchestration state machine of the pipeline. One controller owns the
//! source, up to one decoder per track, and the renderer; it is driven
//! entirely from its mailbox, so every field is mutated only between atomic
//! message handlings.
//!
//! ## Life cycle
//!
//! ```text
//! SetDataSource ─> Start ─> ScanSources ─┬─> decoders created lazily
//!                     ▲                  └─> retry (delayed) while a
//!                     │                      track is still missing
//!                     │
//!      discontinuity ─┴─> flush (+ shutdown on format change)
//!                          └─> finish_flush_if_possible ─> rescan
//!
//! Reset ─> flush both tracks with shutdown ─> finish_reset
//! ```
//!
//! Flush and reset interlock: a `Reset` that arrives while a flush is in
//! flight is postponed and re-posted exactly once when the flush settles;
//! scan messages queued before a flush are invalidated by a generation
//! bump. Contract violations (a second data source, acknowledgements in
//! impossible states) abort — they are defects, not runtime conditions.

use std::sync::Arc;

use async_trait::async_trait;
use core_loop::{mailbox, Handler, Looper, MessageSink};
use core_runtime::events::{ListenerRef, PlayerEvent};
use tracing::{debug, info, trace};

use crate::config::PlayerConfig;
use crate::error::{DiscontinuityKind, StreamError};
use crate::traits::{
    AudioSink, Decoder, DecoderEvent, DecoderFactory, InputReply, PerTrack, Renderer,
    RendererEvent, RendererFactory, Source, Track, VideoSurface,
};

// ============================================================================
// Messages
// ============================================================================

/// The controller's closed message set.
///
/// Every public operation and every collaborator notification enters the
/// state machine as one of these variants.
pub enum PlayerMessage {
    /// Supplies the source. Must happen at most once per controller.
    SetDataSource { source: Box<dyn Source> },
    /// Supplies the video output target.
    SetVideoSurface { surface: Arc<dyn VideoSurface> },
    /// Supplies the audio output target.
    SetAudioSink { sink: Arc<dyn AudioSink> },
    /// Starts playback.
    Start,
    /// One iteration of the decoder instantiation retry loop.
    ScanSources { generation: u64 },
    /// A notification from the `track` decoder.
    DecoderNotify { track: Track, event: DecoderEvent },
    /// A notification from the renderer.
    RendererNotify { event: RendererEvent },
    /// Informational: the source buffered more input. Ignored.
    MoreDataQueued,
    /// Tears the pipeline down to the pre-`SetDataSource` state.
    Reset,
}

impl PlayerMessage {
    /// Variant name for logging.
    fn label(&self) -> &'static str {
        match self {
            PlayerMessage::SetDataSource { .. } => "SetDataSource",
            PlayerMessage::SetVideoSurface { .. } => "SetVideoSurface",
            PlayerMessage::SetAudioSink { .. } => "SetAudioSink",
            PlayerMessage::Start => "Start",
            PlayerMessage::ScanSources { .. } => "ScanSources",
            PlayerMessage::DecoderNotify { .. } => "DecoderNotify",
            PlayerMessage::RendererNotify { .. } => "RendererNotify",
            PlayerMessage::MoreDataQueued => "MoreDataQueued",
            PlayerMessage::Reset => "Reset",
        }
    }
}

// ============================================================================
// Notifier handles
// ============================================================================

/// Posting handle a decoder reports through.
///
/// Wraps the controller's mailbox and tags every event with the decoder's
/// track, so a decoder cannot misattribute its notifications.
#[derive(Clone)]
pub struct DecoderNotifier {
    sink: MessageSink<PlayerMessage>,
    track: Track,
}

impl DecoderNotifier {
    /// The track this notifier is bound to.
    pub fn track(&self) -> Track {
        self.track
    }

    /// Posts one decoder event to the controller.
    pub fn notify(&self, event: DecoderEvent) {
        self.sink.post(PlayerMessage::DecoderNotify {
            track: self.track,
            event,
        });
    }
}

/// Posting handle the renderer reports through.
#[derive(Clone)]
pub struct RendererNotifier {
    sink: MessageSink<PlayerMessage>,
}

impl RendererNotifier {
    /// Posts one renderer event to the controller.
    pub fn notify(&self, event: RendererEvent) {
        self.sink.post(PlayerMessage::RendererNotify { event });
    }
}

// ============================================================================
// Flush state machine
// ============================================================================

/// Per-track flush/shutdown progress.
///
/// Both tracks traverse a discontinuity together: flushing one track parks
/// the other in `AwaitingDiscontinuity` (or directly in `Flushed` when it
/// has no decoder) until both are quiescent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushStatus {
    /// Steady state.
    #[default]
    None,
    /// The peer track is flushing; this track has not hit its own
    /// discontinuity yet.
    AwaitingDiscontinuity,
    /// Flush signalled; waiting for the decoder's acknowledgement.
    FlushingDecoder,
    /// Flush signalled; the decoder must be shut down once it acknowledges.
    FlushingDecoderShutdown,
    /// Shutdown initiated; waiting for the decoder's acknowledgement.
    ShuttingDownDecoder,
    /// Flush acknowledged; the decoder is idle but alive.
    Flushed,
    /// Shutdown acknowledged; the decoder is gone.
    ShutDown,
}

impl FlushStatus {
    /// Returns `Some(need_shutdown)` while a flush is in flight.
    ///
    /// Only the two flushing states gate decoder input; a track in
    /// `AwaitingDiscontinuity` keeps feeding until it reaches its own
    /// discontinuity.
    fn flush_in_flight(self) -> Option<bool> {
        match self {
            FlushStatus::FlushingDecoder => Some(false),
            FlushStatus::FlushingDecoderShutdown => Some(true),
            _ => None,
        }
    }

    /// Returns `true` once the track is quiescent (flushed or shut down).
    fn is_settled(self) -> bool {
        matches!(self, FlushStatus::Flushed | FlushStatus::ShutDown)
    }
}

/// Everything the controller tracks per elementary stream.
#[derive(Default)]
struct TrackState {
    decoder: Option<Box<dyn Decoder>>,
    flush: FlushStatus,
    eos: bool,
}

impl TrackState {
    /// A track no longer participates in playback once it hit EOS or never
    /// had a decoder at all.
    fn is_done(&self) -> bool {
        self.eos || self.decoder.is_none()
    }
}

// ============================================================================
// Controller
// ============================================================================

/// The player controller state machine.
///
/// Construct with [`PlayerController::spawn`] for normal use; tests drive a
/// bare controller through its [`Handler`] implementation with a manually
/// held mailbox.
pub struct PlayerController {
    config: PlayerConfig,
    /// The controller's own mailbox sender; also the parent of every
    /// collaborator notifier.
    sink: MessageSink<PlayerMessage>,
    decoder_factory: Arc<dyn DecoderFactory>,
    renderer_factory: Arc<dyn RendererFactory>,
    listener: ListenerRef,

    source: Option<Box<dyn Source>>,
    renderer: Option<Box<dyn Renderer>>,
    audio_sink: Option<Arc<dyn AudioSink>>,
    video_surface: Option<Arc<dyn VideoSurface>>,

    tracks: PerTrack<TrackState>,

    scan_pending: bool,
    scan_generation: u64,
    reset_in_progress: bool,
    reset_postponed: bool,
}

impl PlayerController {
    /// Creates a controller that posts to itself (and hands collaborator
    /// notifiers) through `sink`.
    ///
    /// `sink` must be the sending side of the mailbox this controller is
    /// driven from; [`PlayerController::spawn`] wires that up.
    pub fn new(
        config: PlayerConfig,
        sink: MessageSink<PlayerMessage>,
        decoder_factory: Arc<dyn DecoderFactory>,
        renderer_factory: Arc<dyn RendererFactory>,
        listener: ListenerRef,
    ) -> Self {
        if let Err(reason) = config.validate() {
            panic!("invalid player configuration: {reason}");
        }
        Self {
            config,
            sink,
            decoder_factory,
            renderer_factory,
            listener,
            source: None,
            renderer: None,
            audio_sink: None,
            video_surface: None,
            tracks: PerTrack::default(),
            scan_pending: false,
            scan_generation: 0,
            reset_in_progress: false,
            reset_postponed: false,
        }
    }

    /// Spawns the controller on its own dispatch loop and returns the
    /// client-facing handle.
    pub fn spawn(
        config: PlayerConfig,
        decoder_factory: Arc<dyn DecoderFactory>,
        renderer_factory: Arc<dyn RendererFactory>,
        listener: ListenerRef,
    ) -> PlayerHandle {
        let (sink, mbox) = mailbox();
        let controller = PlayerController::new(
            config,
            sink.clone(),
            decoder_factory,
            renderer_factory,
            listener,
        );
        let looper = Looper::spawn_with(mbox, controller);
        PlayerHandle { sink, looper }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Current flush status of `track`.
    pub fn flush_status(&self, track: Track) -> FlushStatus {
        self.tracks[track].flush
    }

    /// Returns `true` while `track` has a live decoder.
    pub fn has_decoder(&self, track: Track) -> bool {
        self.tracks[track].decoder.is_some()
    }

    /// Returns `true` once the renderer reported end of stream for `track`.
    pub fn is_track_eos(&self, track: Track) -> bool {
        self.tracks[track].eos
    }

    /// Generation stamp carried by currently valid scan messages.
    pub fn scan_generation(&self) -> u64 {
        self.scan_generation
    }

    /// Returns `true` while a scan message is queued.
    pub fn scan_pending(&self) -> bool {
        self.scan_pending
    }

    // ========================================================================
    // Start & scanning
    // ========================================================================

    fn on_start(&mut self) {
        info!("starting playback");

        self.tracks[Track::Audio].eos = false;
        self.tracks[Track::Video].eos = false;

        self.source
            .as_mut()
            .expect("start without a data source")
            .start();

        let notify = RendererNotifier {
            sink: self.sink.clone(),
        };
        let renderer = self
            .renderer_factory
            .create_renderer(self.audio_sink.clone(), notify);
        self.renderer = Some(renderer);

        self.post_scan_sources();
    }

    /// Queues one scan iteration unless one is already queued.
    fn post_scan_sources(&mut self) {
        if self.scan_pending {
            return;
        }
        self.sink.post(PlayerMessage::ScanSources {
            generation: self.scan_generation,
        });
        self.scan_pending = true;
    }

    fn on_scan_sources(&mut self, generation: u64) {
        if generation != self.scan_generation {
            trace!(
                generation,
                current = self.scan_generation,
                "dropping stale scan"
            );
            return;
        }
        self.scan_pending = false;

        self.instantiate_decoder(Track::Video);
        if self.audio_sink.is_some() {
            self.instantiate_decoder(Track::Audio);
        }

        let source = self.source.as_mut().expect("scanning without a data source");
        if !source.feed_more() {
            if self.tracks[Track::Audio].decoder.is_none()
                && self.tracks[Track::Video].decoder.is_none()
            {
                // No track ever surfaced and the input just ran dry.
                info!("no tracks found and input exhausted");
                self.listener.notify(PlayerEvent::PlaybackComplete, 0, 0);
            }
            return;
        }

        if self.tracks[Track::Audio].decoder.is_none()
            || self.tracks[Track::Video].decoder.is_none()
        {
            self.sink.post_delayed(
                PlayerMessage::ScanSources {
                    generation: self.scan_generation,
                },
                self.config.scan_retry_delay,
            );
            self.scan_pending = true;
        }
    }

    fn instantiate_decoder(&mut self, track: Track) {
        if self.tracks[track].decoder.is_some() {
            return;
        }

        let source = self.source.as_ref().expect("scanning without a data source");
        let Some(format) = source.format(track) else {
            // Track not advertised yet; the scan retry will come back.
            return;
        };

        info!(%track, ?format, "instantiating decoder");

        let notify = DecoderNotifier {
            sink: self.sink.clone(),
            track,
        };
        let surface = if track.is_audio() {
            None
        } else {
            self.video_surface.clone()
        };
        let mut decoder = self.decoder_factory.create_decoder(notify, surface);
        decoder.configure(&format);
        self.tracks[track].decoder = Some(decoder);
    }

    // ========================================================================
    // Decoder notifications
    // ========================================================================

    fn on_decoder_notify(&mut self, track: Track, event: DecoderEvent) {
        trace!(%track, event = event.label(), "decoder notify");
        match event {
            DecoderEvent::FillThisBuffer { reply } => {
                if let Some(reply) = self.feed_decoder_input(track, reply) {
                    // Input starved. Give the source a chance; if it may
                    // still produce, retry this very request.
                    let source = self
                        .source
                        .as_mut()
                        .expect("feeding a decoder without a data source");
                    if source.feed_more() {
                        self.sink.post(PlayerMessage::DecoderNotify {
                            track,
                            event: DecoderEvent::FillThisBuffer { reply },
                        });
                    }
                }
            }
            DecoderEvent::Eos { error } => {
                self.renderer
                    .as_mut()
                    .expect("decoder EOS without a renderer")
                    .queue_eos(track, error);
            }
            DecoderEvent::FlushCompleted => self.on_flush_completed(track),
            DecoderEvent::OutputFormatChanged {
                channel_count,
                sample_rate,
            } => self.on_output_format_changed(track, channel_count, sample_rate),
            DecoderEvent::ShutdownCompleted => self.on_shutdown_completed(track),
            DecoderEvent::DrainThisBuffer { buffer, reply } => {
                trace!(%track, pts_us = buffer.pts_us, "forwarding decoded buffer");
                self.renderer
                    .as_mut()
                    .expect("decoded buffer without a renderer")
                    .queue_buffer(track, buffer, reply);
            }
        }
    }

    /// Answers one input request, or returns the reply unconsumed when the
    /// source has nothing buffered (the caller decides whether to retry).
    fn feed_decoder_input(&mut self, track: Track, reply: InputReply) -> Option<InputReply> {
        if self.tracks[track].flush.flush_in_flight().is_some() {
            // Decoded output must not cross the discontinuity boundary.
            let _ = reply.send(Err(StreamError::Discontinuity(DiscontinuityKind::Time)));
            return None;
        }

        let source = self
            .source
            .as_mut()
            .expect("feeding a decoder without a data source");
        match source.dequeue_access_unit(track) {
            Ok(unit) => {
                trace!(%track, pts_us = unit.pts_us, "dequeued access unit");
                let _ = reply.send(Ok(unit));
                None
            }
            Err(StreamError::WouldBlock) => Some(reply),
            Err(error) => {
                if let StreamError::Discontinuity(kind) = &error {
                    let format_change = *kind == DiscontinuityKind::FormatChange;
                    debug!(%track, format_change, "discontinuity in source stream");
                    self.flush_decoder(track, format_change);
                }
                let _ = reply.send(Err(error));
                None
            }
        }
    }

    fn on_flush_completed(&mut self, track: Track) {
        let Some(need_shutdown) = self.tracks[track].flush.flush_in_flight() else {
            panic!(
                "{track} flush completed in state {:?}",
                self.tracks[track].flush
            );
        };
        self.tracks[track].flush = FlushStatus::Flushed;
        debug!(%track, "decoder flush completed");

        if need_shutdown {
            debug!(%track, "initiating decoder shutdown");
            self.tracks[track]
                .decoder
                .as_mut()
                .expect("shutting down a track without a decoder")
                .initiate_shutdown();
            self.tracks[track].flush = FlushStatus::ShuttingDownDecoder;
        }

        self.finish_flush_if_possible();
    }

    fn on_shutdown_completed(&mut self, track: Track) {
        debug!(%track, "decoder shutdown completed");

        self.tracks[track].decoder = None;
        assert_eq!(
            self.tracks[track].flush,
            FlushStatus::ShuttingDownDecoder,
            "{track} shutdown completed in unexpected state",
        );
        self.tracks[track].flush = FlushStatus::ShutDown;

        self.finish_flush_if_possible();
    }

    fn on_output_format_changed(&mut self, track: Track, channel_count: u16, sample_rate: u32) {
        assert!(track.is_audio(), "output format change on the video track");

        info!(sample_rate, channel_count, "audio output format changed");

        let sink = self
            .audio_sink
            .as_ref()
            .expect("audio format change without an audio sink");
        sink.close();
        if let Err(error) = sink.open(sample_rate, channel_count) {
            // Reopen failure has no recovery path.
            panic!("{error}");
        }
        sink.start();

        self.renderer
            .as_mut()
            .expect("audio format change without a renderer")
            .signal_audio_sink_changed();
    }

    // ========================================================================
    // Renderer notifications
    // ========================================================================

    fn on_renderer_notify(&mut self, event: RendererEvent) {
        match event {
            RendererEvent::Eos { track } => {
                self.tracks[track].eos = true;
                debug!(%track, "renderer reached end of stream");

                if self.tracks[Track::Audio].is_done() && self.tracks[Track::Video].is_done() {
                    info!("playback complete");
                    self.listener.notify(PlayerEvent::PlaybackComplete, 0, 0);
                }
            }
            RendererEvent::FlushComplete { track } => {
                // Flush completion is driven by the decoders; this is
                // informational.
                debug!(%track, "renderer flush completed");
            }
        }
    }

    // ========================================================================
    // Flush & reset
    // ========================================================================

    /// Starts a flush of `track`, invalidating queued scans and parking the
    /// peer track so both observe the discontinuity boundary together.
    fn flush_decoder(&mut self, track: Track, need_shutdown: bool) {
        // Scans queued before this point now carry a stale generation; the
        // pending flag must follow, since the queued message will be
        // discarded on arrival.
        self.scan_generation += 1;
        self.scan_pending = false;

        self.tracks[track]
            .decoder
            .as_mut()
            .expect("flushing a track without a decoder")
            .signal_flush();
        self.renderer
            .as_mut()
            .expect("flushing without a renderer")
            .flush(track);

        let prior = self.tracks[track].flush;
        assert!(
            matches!(
                prior,
                FlushStatus::None | FlushStatus::AwaitingDiscontinuity
            ),
            "{track} flush requested in state {prior:?}",
        );
        self.tracks[track].flush = if need_shutdown {
            FlushStatus::FlushingDecoderShutdown
        } else {
            FlushStatus::FlushingDecoder
        };

        let peer = track.peer();
        if self.tracks[peer].flush == FlushStatus::None {
            self.tracks[peer].flush = if self.tracks[peer].decoder.is_some() {
                FlushStatus::AwaitingDiscontinuity
            } else {
                FlushStatus::Flushed
            };
        }

        info!(%track, need_shutdown, "flush started");
    }

    /// Completes the flush once both tracks are quiescent, then runs
    /// whichever follow-up is due: a deferred reset, a postponed reset, or
    /// a rescan for shut-down tracks.
    fn finish_flush_if_possible(&mut self) {
        if !self.tracks[Track::Audio].flush.is_settled()
            || !self.tracks[Track::Video].flush.is_settled()
        {
            return;
        }

        debug!("both tracks are quiescent");

        self.renderer
            .as_mut()
            .expect("finishing a flush without a renderer")
            .signal_time_discontinuity();

        let mut scan_again = false;
        for track in [Track::Audio, Track::Video] {
            if self.tracks[track].flush == FlushStatus::ShutDown {
                scan_again = true;
            } else if let Some(decoder) = self.tracks[track].decoder.as_mut() {
                decoder.signal_resume();
            }
            self.tracks[track].flush = FlushStatus::None;
        }

        if self.reset_in_progress {
            debug!("deferred reset resuming");
            self.reset_in_progress = false;
            self.finish_reset();
        } else if self.reset_postponed {
            self.reset_postponed = false;
            self.sink.post(PlayerMessage::Reset);
        } else if scan_again {
            self.post_scan_sources();
        }
    }

    fn on_reset(&mut self) {
        debug!("reset requested");

        if self.tracks[Track::Audio].flush != FlushStatus::None
            || self.tracks[Track::Video].flush != FlushStatus::None
        {
            // A flush is in flight; run the reset once it settles.
            debug!("postponing reset until the flush completes");
            self.reset_postponed = true;
            return;
        }

        if self.tracks[Track::Audio].decoder.is_none()
            && self.tracks[Track::Video].decoder.is_none()
        {
            self.finish_reset();
            return;
        }

        for track in [Track::Audio, Track::Video] {
            if self.tracks[track].decoder.is_some() {
                self.flush_decoder(track, true);
            }
        }

        self.reset_in_progress = true;
    }

    fn finish_reset(&mut self) {
        assert!(
            self.tracks[Track::Audio].decoder.is_none(),
            "audio decoder survived reset"
        );
        assert!(
            self.tracks[Track::Video].decoder.is_none(),
            "video decoder survived reset"
        );

        self.renderer = None;
        self.source = None;

        info!("reset complete");
        self.listener.notify(PlayerEvent::ResetComplete, 0, 0);
    }
}

#[async_trait]
impl Handler for PlayerController {
    type Message = PlayerMessage;

    async fn handle(&mut self, msg: PlayerMessage) {
        trace!(message = msg.label(), "dispatch");
        match msg {
            PlayerMessage::SetDataSource { source } => {
                assert!(self.source.is_none(), "data source already set");
                self.source = Some(source);
            }
            PlayerMessage::SetVideoSurface { surface } => {
                self.video_surface = Some(surface);
            }
            PlayerMessage::SetAudioSink { sink } => {
                self.audio_sink = Some(sink);
            }
            PlayerMessage::Start => self.on_start(),
            PlayerMessage::ScanSources { generation } => self.on_scan_sources(generation),
            PlayerMessage::DecoderNotify { track, event } => self.on_decoder_notify(track, event),
            PlayerMessage::RendererNotify { event } => self.on_renderer_notify(event),
            PlayerMessage::MoreDataQueued => trace!("more data queued"),
            PlayerMessage::Reset => self.on_reset(),
        }
    }
}

// ============================================================================
// Client handle
// ============================================================================

/// Client-facing handle to a running player controller.
///
/// Every method is non-blocking: it enqueues one message and returns.
pub struct PlayerHandle {
    sink: MessageSink<PlayerMessage>,
    looper: Looper,
}

impl PlayerHandle {
    /// Supplies the data source. Calling this twice is a contract violation.
    pub fn set_data_source(&self, source: Box<dyn Source>) {
        self.sink.post(PlayerMessage::SetDataSource { source });
    }

    /// Supplies the video output target.
    pub fn set_video_surface(&self, surface: Arc<dyn VideoSurface>) {
        self.sink.post(PlayerMessage::SetVideoSurface { surface });
    }

    /// Supplies the audio output target.
    pub fn set_audio_sink(&self, sink: Arc<dyn AudioSink>) {
        self.sink.post(PlayerMessage::SetAudioSink { sink });
    }

    /// Starts playback.
    pub fn start(&self) {
        self.sink.post(PlayerMessage::Start);
    }

    /// Asynchronously tears the pipeline down; the listener receives
    /// [`PlayerEvent::ResetComplete`] when done.
    pub fn reset(&self) {
        self.sink.post(PlayerMessage::Reset);
    }

    /// The controller's mailbox, for collaborators that post directly.
    pub fn message_sink(&self) -> MessageSink<PlayerMessage> {
        self.sink.clone()
    }

    /// Stops the dispatch loop and waits for it to finish.
    pub async fn shutdown(self) {
        self.looper.join().await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_in_flight_classification() {
        assert_eq!(FlushStatus::FlushingDecoder.flush_in_flight(), Some(false));
        assert_eq!(
            FlushStatus::FlushingDecoderShutdown.flush_in_flight(),
            Some(true)
        );
        for status in [
            FlushStatus::None,
            FlushStatus::AwaitingDiscontinuity,
            FlushStatus::ShuttingDownDecoder,
            FlushStatus::Flushed,
            FlushStatus::ShutDown,
        ] {
            assert_eq!(status.flush_in_flight(), None, "{status:?}");
        }
    }

    #[test]
    fn settled_states() {
        assert!(FlushStatus::Flushed.is_settled());
        assert!(FlushStatus::ShutDown.is_settled());
        assert!(!FlushStatus::None.is_settled());
        assert!(!FlushStatus::AwaitingDiscontinuity.is_settled());
        assert!(!FlushStatus::FlushingDecoder.is_settled());
        assert!(!FlushStatus::ShuttingDownDecoder.is_settled());
    }

    #[test]
    fn message_labels() {
        assert_eq!(PlayerMessage::Start.label(), "Start");
        assert_eq!(PlayerMessage::Reset.label(), "Reset");
        assert_eq!(PlayerMessage::MoreDataQueued.label(), "MoreDataQueued");
        assert_eq!(
            PlayerMessage::ScanSources { generation: 3 }.label(),
            "ScanSources"
        );
    }

    #[test]
    fn track_state_done_rules() {
        let mut state = TrackState::default();
        // No decoder at all counts as done.
        assert!(state.is_done());
        state.eos = true;
        assert!(state.is_done());
    }
}
