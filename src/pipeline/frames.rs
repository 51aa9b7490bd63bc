//! Frames, frame sequences and content-derived source identity.

use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::ascii::PixelBuffer;

/// Delay given to animated frames that carry none.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Shortest delay an animated frame is played with.
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);

/// One image of a sequence and how long it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub buffer: PixelBuffer,
    pub delay: Duration,
}

impl Frame {
    /// A still image: zero delay.
    pub fn still(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            delay: Duration::ZERO,
        }
    }

    /// An animation frame. Missing or zero delays fall back to 100 ms, and
    /// anything shorter than 20 ms is raised to 20 ms.
    pub fn animated(buffer: PixelBuffer, delay: Option<Duration>) -> Self {
        Self {
            buffer,
            delay: animated_delay(delay),
        }
    }
}

/// Normalize a decoded frame delay for playback.
pub fn animated_delay(delay: Option<Duration>) -> Duration {
    match delay {
        Some(d) if !d.is_zero() => d.max(MIN_FRAME_DELAY),
        _ => DEFAULT_FRAME_DELAY,
    }
}

/// Content fingerprint of a frame sequence.
///
/// The first 16 bytes of a SHA-256 over every frame's dimensions, delay and
/// pixels, hex encoded. Equal content always gives an equal id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered list of frames; length 1 for a still image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    id: SourceId,
}

impl FrameSequence {
    pub fn new(frames: Vec<Frame>) -> Self {
        let id = fingerprint(&frames);
        Self { frames, id }
    }

    /// A single still image.
    pub fn still(buffer: PixelBuffer) -> Self {
        Self::new(vec![Frame::still(buffer)])
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

fn fingerprint(frames: &[Frame]) -> SourceId {
    let mut hasher = Sha256::new();
    hasher.update((frames.len() as u64).to_le_bytes());
    for frame in frames {
        hasher.update(frame.buffer.width().to_le_bytes());
        hasher.update(frame.buffer.height().to_le_bytes());
        hasher.update((frame.delay.as_millis() as u64).to_le_bytes());
        hasher.update(frame.buffer.data());
    }
    let result = hasher.finalize();
    SourceId(hex::encode(&result[..16]))
}
