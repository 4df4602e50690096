//! # Playback Error Types
//!
//! Error taxonomy for the pipeline. Would-block is a scheduling condition
//! absorbed by the scan/retry loops, discontinuities drive the flush state
//! machine, end-of-stream propagates per track. Anything that indicates a
//! broken contract is not represented here at all — those are defects and
//! abort via assertion.

use thiserror::Error;

/// Subtype carried by a stream discontinuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscontinuityKind {
    /// Codec parameters changed; the decoder must be torn down and rebuilt.
    FormatChange,
    /// Timestamps are no longer contiguous; flushing suffices.
    Time,
}

/// Errors surfaced by pipeline stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    // ========================================================================
    // Scheduling conditions
    // ========================================================================
    /// No data is available right now; retry later.
    #[error("no data available right now")]
    WouldBlock,

    // ========================================================================
    // Structured stream signals
    // ========================================================================
    /// Subsequent access units are not contiguous with prior ones.
    #[error("stream discontinuity ({0:?})")]
    Discontinuity(DiscontinuityKind),

    /// The track produced its last access unit.
    #[error("end of stream")]
    EndOfStream,

    // ========================================================================
    // Source failures
    // ========================================================================
    /// The source failed in a way the pipeline cannot interpret.
    #[error("source failure: {0}")]
    Source(String),
}

impl StreamError {
    /// Returns `true` if the condition is transient and worth retrying.
    pub fn is_would_block(&self) -> bool {
        matches!(self, StreamError::WouldBlock)
    }

    /// Returns `true` for discontinuities of any kind.
    pub fn is_discontinuity(&self) -> bool {
        matches!(self, StreamError::Discontinuity(_))
    }

    /// Returns `true` when the track cannot produce further data.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamError::EndOfStream | StreamError::Source(_))
    }
}

/// Errors from the platform audio sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The platform rejected the requested PCM configuration.
    #[error("failed to open audio sink at {sample_rate} Hz / {channels} ch: {reason}")]
    OpenFailed {
        sample_rate: u32,
        channels: u16,
        reason: String,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(StreamError::WouldBlock.is_would_block());
        assert!(!StreamError::WouldBlock.is_terminal());

        let disc = StreamError::Discontinuity(DiscontinuityKind::FormatChange);
        assert!(disc.is_discontinuity());
        assert!(!disc.is_terminal());

        assert!(StreamError::EndOfStream.is_terminal());
        assert!(StreamError::Source("gone".into()).is_terminal());
    }

    #[test]
    fn display_strings() {
        assert_eq!(
            StreamError::EndOfStream.to_string(),
            "end of stream"
        );
        assert_eq!(
            StreamError::Discontinuity(DiscontinuityKind::Time).to_string(),
            "stream discontinuity (Time)"
        );
        let sink = SinkError::OpenFailed {
            sample_rate: 48000,
            channels: 2,
            reason: "device busy".into(),
        };
        assert_eq!(
            sink.to_string(),
            "failed to open audio sink at 48000 Hz / 2 ch: device busy"
        );
    }
}
