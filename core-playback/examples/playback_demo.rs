//! # Playback Pipeline Example
//!
//! Wires stub collaborators through the player controller: an in-memory
//! audio source whose track only appears after a couple of scan rounds, a
//! loopback decoder that echoes access units as decoded buffers, and a
//! renderer that logs what it would present.
//!
//! Run with: `cargo run --example playback_demo --package core-playback`

use std::collections::VecDeque;
use std::sync::Arc;

use core_playback::{
    AudioCodec, AudioFormat, AudioSink, Decoder, DecoderEvent, DecoderFactory, DecoderNotifier,
    DrainReply, MediaBuffer, MediaFormat, PlayerConfig, PlayerController, Renderer, RendererEvent,
    RendererFactory, RendererNotifier, Result, SinkError, Source, StreamError, Track, VideoSurface,
};
use core_runtime::events::{EventListener, ListenerRef, PlayerEvent};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// ============================================================================
// In-memory source
// ============================================================================

/// Serves a fixed run of audio access units. The track is only advertised
/// after two `feed_more` rounds, which exercises the scan retry loop.
struct DemoSource {
    units: VecDeque<MediaBuffer>,
    feed_calls: u32,
}

impl DemoSource {
    fn new(unit_count: usize) -> Self {
        let units = (0..unit_count)
            .map(|i| MediaBuffer::new(vec![i as u8; 32], i as i64 * 20_000))
            .collect();
        Self {
            units,
            feed_calls: 0,
        }
    }
}

impl Source for DemoSource {
    fn start(&mut self) {
        info!("source started");
    }

    fn format(&self, track: Track) -> Option<MediaFormat> {
        if track.is_audio() && self.feed_calls >= 2 {
            Some(MediaFormat::Audio(AudioFormat {
                codec: AudioCodec::Aac,
                sample_rate: 44_100,
                channels: 2,
            }))
        } else {
            None
        }
    }

    fn feed_more(&mut self) -> bool {
        self.feed_calls += 1;
        !self.units.is_empty()
    }

    fn dequeue_access_unit(&mut self, track: Track) -> Result<MediaBuffer> {
        if !track.is_audio() {
            return Err(StreamError::WouldBlock);
        }
        self.units.pop_front().ok_or(StreamError::EndOfStream)
    }
}

// ============================================================================
// Loopback decoder
// ============================================================================

/// Requests input in a background task and echoes each access unit back as
/// a decoded buffer.
struct LoopbackDecoder {
    notify: DecoderNotifier,
}

impl LoopbackDecoder {
    fn spawn_decode_loop(notify: DecoderNotifier) {
        tokio::spawn(async move {
            loop {
                let (reply, answer) = oneshot::channel();
                notify.notify(DecoderEvent::FillThisBuffer { reply });
                match answer.await {
                    Ok(Ok(buffer)) => {
                        let (reply, consumed) = oneshot::channel();
                        notify.notify(DecoderEvent::DrainThisBuffer { buffer, reply });
                        let _ = consumed.await;
                    }
                    Ok(Err(error @ StreamError::EndOfStream)) => {
                        notify.notify(DecoderEvent::Eos { error });
                        break;
                    }
                    Ok(Err(_)) | Err(_) => break,
                }
            }
        });
    }
}

impl Decoder for LoopbackDecoder {
    fn configure(&mut self, format: &MediaFormat) {
        info!(?format, "decoder configured");
        Self::spawn_decode_loop(self.notify.clone());
    }

    fn signal_flush(&mut self) {
        self.notify.notify(DecoderEvent::FlushCompleted);
    }

    fn signal_resume(&mut self) {
        Self::spawn_decode_loop(self.notify.clone());
    }

    fn initiate_shutdown(&mut self) {
        self.notify.notify(DecoderEvent::ShutdownCompleted);
    }
}

struct DemoDecoderFactory;

impl DecoderFactory for DemoDecoderFactory {
    fn create_decoder(
        &self,
        notify: DecoderNotifier,
        _surface: Option<Arc<dyn VideoSurface>>,
    ) -> Box<dyn Decoder> {
        Box::new(LoopbackDecoder { notify })
    }
}

// ============================================================================
// Logging renderer & sink
// ============================================================================

struct DemoRenderer {
    notify: RendererNotifier,
}

impl Renderer for DemoRenderer {
    fn queue_buffer(&mut self, track: Track, buffer: MediaBuffer, reply: DrainReply) {
        info!(%track, pts_us = buffer.pts_us, len = buffer.len(), "presenting buffer");
        reply.send(()).ok();
    }

    fn queue_eos(&mut self, track: Track, error: StreamError) {
        info!(%track, %error, "track ended");
        self.notify.notify(RendererEvent::Eos { track });
    }

    fn flush(&mut self, track: Track) {
        debug!(%track, "renderer flushed");
        self.notify.notify(RendererEvent::FlushComplete { track });
    }

    fn signal_time_discontinuity(&mut self) {
        debug!("time discontinuity");
    }

    fn signal_audio_sink_changed(&mut self) {
        debug!("audio sink changed");
    }
}

struct DemoRendererFactory;

impl RendererFactory for DemoRendererFactory {
    fn create_renderer(
        &self,
        _audio_sink: Option<Arc<dyn AudioSink>>,
        notify: RendererNotifier,
    ) -> Box<dyn Renderer> {
        Box::new(DemoRenderer { notify })
    }
}

struct DemoAudioSink;

impl AudioSink for DemoAudioSink {
    fn open(&self, sample_rate: u32, channel_count: u16) -> std::result::Result<(), SinkError> {
        info!(sample_rate, channel_count, "audio sink opened");
        Ok(())
    }

    fn start(&self) {
        info!("audio sink started");
    }

    fn close(&self) {
        info!("audio sink closed");
    }
}

// ============================================================================
// Listener
// ============================================================================

struct ChannelListener {
    tx: mpsc::UnboundedSender<PlayerEvent>,
}

impl EventListener for ChannelListener {
    fn send_event(&self, event: PlayerEvent, ext1: i32, ext2: i32) {
        info!(event = event.description(), ext1, ext2, "player event");
        self.tx.send(event).ok();
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_filter("info,core_playback=debug"),
    )
    .expect("Failed to initialize logging");

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let listener: Arc<dyn EventListener> = Arc::new(ChannelListener { tx: events_tx });

    let player = PlayerController::spawn(
        PlayerConfig::default(),
        Arc::new(DemoDecoderFactory),
        Arc::new(DemoRendererFactory),
        ListenerRef::new(&listener),
    );

    let sink: Arc<dyn AudioSink> = Arc::new(DemoAudioSink);
    player.set_audio_sink(sink);
    player.set_data_source(Box::new(DemoSource::new(5)));
    player.start();

    while let Some(event) = events_rx.recv().await {
        match event {
            PlayerEvent::PlaybackComplete => {
                info!("playback finished, resetting");
                player.reset();
            }
            PlayerEvent::ResetComplete => break,
        }
    }

    player.shutdown().await;
    info!("done");
}
