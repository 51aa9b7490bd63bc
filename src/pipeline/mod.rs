//! Frame pipeline: runs the conversion engine over whole frame sequences.
//!
//! A [`FramePipeline`] owns the bounded result cache and the "published"
//! result that display code reads. Each [`FramePipeline::submit`] call
//! supersedes whatever request is still in flight; the superseded run notices
//! at its next token check and exits without touching the cache or the
//! published state.
//!
//! Frames are converted strictly in order on the calling task. After frame
//! `i` where `i % 3 == 0`, and after the last frame, progress is reported and
//! the run yields to the scheduler so other work (including a newer request)
//! can proceed.

mod cache;
mod error;
mod frames;
mod token;

pub use cache::{CacheKey, ConvertedFrame, ConvertedSequence, ResultCache, DEFAULT_CACHE_CAPACITY};
pub use error::PipelineError;
pub use frames::{animated_delay, Frame, FrameSequence, SourceId, DEFAULT_FRAME_DELAY, MIN_FRAME_DELAY};
pub use token::{Generation, RunToken};

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ascii::{convert, ConversionConfig};

/// Frames between progress reports.
const PROGRESS_STRIDE: usize = 3;

/// How a request ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// All frames converted, or served from the cache.
    Completed {
        frames: ConvertedSequence,
        cached: bool,
    },
    /// A newer request took over; nothing was published.
    Cancelled,
}

impl RunOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }

    /// Converted frames of a completed run.
    pub fn frames(&self) -> Option<&ConvertedSequence> {
        match self {
            RunOutcome::Completed { frames, .. } => Some(frames),
            RunOutcome::Cancelled => None,
        }
    }
}

/// The result most recently published by a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub source: SourceId,
    pub config: ConversionConfig,
    pub frames: ConvertedSequence,
}

/// Converts frame sequences with supersession, progress and caching.
#[derive(Debug)]
pub struct FramePipeline {
    generation: Generation,
    cache: Mutex<ResultCache>,
    published: Mutex<Option<Published>>,
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePipeline {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Pipeline whose cache keeps at most `capacity` sequences.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generation: Generation::new(),
            cache: Mutex::new(ResultCache::new(capacity)),
            published: Mutex::new(None),
        }
    }

    /// Start converting `sequence` with `config`.
    ///
    /// The request is registered as soon as this returns, before the future
    /// is first polled, so any run still in flight is superseded immediately.
    /// `progress` receives whole percentages in frame order.
    ///
    /// A cache hit completes on the first poll without converting anything.
    pub fn submit<'a, F>(
        &'a self,
        sequence: &'a FrameSequence,
        config: ConversionConfig,
        progress: F,
    ) -> impl Future<Output = Result<RunOutcome, PipelineError>> + 'a
    where
        F: FnMut(u8) + 'a,
    {
        let token = self.generation.advance();
        log::debug!(
            "Request {} submitted for source {} ({} frame(s))",
            token.id(),
            sequence.id(),
            sequence.len()
        );
        self.run(token, sequence, config, progress)
    }

    /// Supersede the in-flight request without starting a new one.
    pub fn cancel(&self) {
        let token = self.generation.advance();
        log::debug!("Cancelled in-flight work (generation {})", token.id());
    }

    /// Result of the last completed, non-superseded request.
    pub fn published(&self) -> Option<Published> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether converted frames for this source and config are cached.
    pub fn is_cached(&self, source: &SourceId, config: &ConversionConfig) -> bool {
        self.lock_cache()
            .contains(&CacheKey::new(source.clone(), *config))
    }

    pub fn cached_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Drop every cached sequence. Returns how many were removed.
    pub fn clear_cache(&self) -> usize {
        let count = self.lock_cache().clear();
        log::info!("Cleared {} cached sequence(s)", count);
        count
    }

    async fn run<F>(
        &self,
        token: RunToken,
        sequence: &FrameSequence,
        config: ConversionConfig,
        mut progress: F,
    ) -> Result<RunOutcome, PipelineError>
    where
        F: FnMut(u8),
    {
        if token.is_superseded() {
            return Ok(superseded(&token));
        }
        if sequence.is_empty() {
            return Err(PipelineError::EmptySequence);
        }
        config.validate_for_frames(sequence.len())?;

        let key = CacheKey::new(sequence.id().clone(), config);
        let hit = self.lock_cache().get(&key);
        if let Some(frames) = hit {
            log::debug!("Cache hit for source {}", key.source);
            self.publish(&key, Arc::clone(&frames));
            return Ok(RunOutcome::Completed {
                frames,
                cached: true,
            });
        }

        let total = sequence.len();
        log::info!(
            "Converting {} frame(s) as {} at resolution {}",
            total,
            config.format,
            config.resolution
        );

        let mut converted = Vec::with_capacity(total);
        for (index, frame) in sequence.frames().iter().enumerate() {
            if token.is_superseded() {
                return Ok(superseded(&token));
            }

            let result = match convert(&frame.buffer, &config) {
                Ok(result) => result,
                Err(_) if token.is_superseded() => return Ok(superseded(&token)),
                Err(source) => {
                    log::warn!("Frame {} failed to convert: {}", index, source);
                    return Err(PipelineError::Frame { index, source });
                }
            };

            if token.is_superseded() {
                return Ok(superseded(&token));
            }
            converted.push(ConvertedFrame {
                result,
                delay: frame.delay,
            });

            if index % PROGRESS_STRIDE == 0 || index + 1 == total {
                progress(percent(index + 1, total));
                tokio::task::yield_now().await;
                if token.is_superseded() {
                    return Ok(superseded(&token));
                }
            }
        }

        let frames: ConvertedSequence = Arc::new(converted);
        let evicted = self.lock_cache().insert(key.clone(), Arc::clone(&frames));
        if let Some(evicted) = evicted {
            log::debug!("Evicted cached source {}", evicted.source);
        }
        self.publish(&key, Arc::clone(&frames));
        log::info!("Request {} complete ({} frame(s))", token.id(), total);

        Ok(RunOutcome::Completed {
            frames,
            cached: false,
        })
    }

    fn publish(&self, key: &CacheKey, frames: ConvertedSequence) {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *published = Some(Published {
            source: key.source.clone(),
            config: key.config,
            frames,
        });
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn superseded(token: &RunToken) -> RunOutcome {
    log::debug!("Request {} superseded, discarding partial work", token.id());
    RunOutcome::Cancelled
}

/// Whole percentage of `done` out of `total`, rounded half up.
fn percent(done: usize, total: usize) -> u8 {
    ((done * 200 + total) / (total * 2)).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{CharSet, PixelBuffer};
    use std::time::Duration;

    fn config() -> ConversionConfig {
        ConversionConfig {
            format: CharSet::Standard,
            resolution: 20,
            dithering: false,
            ..Default::default()
        }
    }

    fn sequence(frames: usize, shade: u8) -> FrameSequence {
        let frames = (0..frames)
            .map(|i| {
                let v = shade.wrapping_add(i as u8);
                let buffer = PixelBuffer::filled(40, 20, [v, v, v, 255]).unwrap();
                Frame::animated(buffer, Some(Duration::from_millis(40)))
            })
            .collect();
        FrameSequence::new(frames)
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(1, 7), 14);
        assert_eq!(percent(4, 7), 57);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(7, 7), 100);
    }

    #[tokio::test]
    async fn test_progress_follows_frame_order() {
        let pipeline = FramePipeline::new();
        let seq = sequence(7, 10);
        let mut reports = Vec::new();
        let outcome = pipeline
            .submit(&seq, config(), |p| reports.push(p))
            .await
            .unwrap();

        assert_eq!(reports, vec![14, 57, 100]);
        let frames = outcome.frames().unwrap();
        assert_eq!(frames.len(), 7);
        assert!(frames.iter().all(|f| f.delay == Duration::from_millis(40)));
    }

    #[tokio::test]
    async fn test_single_frame_reports_once() {
        let pipeline = FramePipeline::new();
        let seq = FrameSequence::still(PixelBuffer::filled(40, 20, [0, 0, 0, 255]).unwrap());
        let mut reports = Vec::new();
        pipeline
            .submit(&seq, config(), |p| reports.push(p))
            .await
            .unwrap();
        assert_eq!(reports, vec![100]);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_conversion() {
        let pipeline = FramePipeline::new();
        let seq = sequence(4, 50);

        let first = pipeline.submit(&seq, config(), |_| {}).await.unwrap();
        assert!(matches!(first, RunOutcome::Completed { cached: false, .. }));

        let mut reports = Vec::new();
        let second = pipeline
            .submit(&seq, config(), |p| reports.push(p))
            .await
            .unwrap();
        assert!(matches!(second, RunOutcome::Completed { cached: true, .. }));
        assert!(reports.is_empty());
        assert!(Arc::ptr_eq(first.frames().unwrap(), second.frames().unwrap()));
    }

    #[tokio::test]
    async fn test_six_requests_keep_five() {
        let pipeline = FramePipeline::new();
        let sources: Vec<_> = (0..6).map(|i| sequence(1, i * 20)).collect();
        for seq in &sources {
            pipeline.submit(seq, config(), |_| {}).await.unwrap();
        }
        assert_eq!(pipeline.cached_len(), 5);
        assert!(!pipeline.is_cached(sources[0].id(), &config()));
        for seq in &sources[1..] {
            assert!(pipeline.is_cached(seq.id(), &config()));
        }
    }

    #[tokio::test]
    async fn test_superseded_run_publishes_nothing() {
        let pipeline = FramePipeline::new();
        let seq_a = sequence(9, 10);
        let seq_b = sequence(2, 200);
        let (tx, rx) = tokio::sync::oneshot::channel();
        let mut tx = Some(tx);

        let run_a = pipeline.submit(&seq_a, config(), move |_| {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        });
        let run_b = async {
            rx.await.unwrap();
            pipeline.submit(&seq_b, config(), |_| {}).await
        };

        let (a, b) = tokio::join!(run_a, run_b);
        assert_eq!(a.unwrap(), RunOutcome::Cancelled);
        assert!(matches!(b.unwrap(), RunOutcome::Completed { cached: false, .. }));

        assert!(!pipeline.is_cached(seq_a.id(), &config()));
        let published = pipeline.published().unwrap();
        assert_eq!(&published.source, seq_b.id());
        assert_eq!(published.frames.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_before_poll() {
        let pipeline = FramePipeline::new();
        let seq = sequence(3, 0);
        let run = pipeline.submit(&seq, config(), |_| {});
        pipeline.cancel();
        assert_eq!(run.await.unwrap(), RunOutcome::Cancelled);
        assert!(pipeline.published().is_none());
        assert_eq!(pipeline.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_frame_failure_aborts_without_caching() {
        let pipeline = FramePipeline::new();
        let good = PixelBuffer::filled(40, 20, [0, 0, 0, 255]).unwrap();
        // 1000x1 at resolution 20 maps to a zero-height grid.
        let bad = PixelBuffer::filled(1000, 1, [0, 0, 0, 255]).unwrap();
        let seq = FrameSequence::new(vec![
            Frame::animated(good.clone(), None),
            Frame::animated(good, None),
            Frame::animated(bad, None),
        ]);

        let err = pipeline.submit(&seq, config(), |_| {}).await.unwrap_err();
        assert!(matches!(err, PipelineError::Frame { index: 2, .. }));
        assert_eq!(pipeline.cached_len(), 0);
        assert!(pipeline.published().is_none());
    }

    #[tokio::test]
    async fn test_empty_sequence_is_an_error() {
        let pipeline = FramePipeline::new();
        let seq = FrameSequence::new(Vec::new());
        let err = pipeline.submit(&seq, config(), |_| {}).await.unwrap_err();
        assert_eq!(err, PipelineError::EmptySequence);
    }

    #[tokio::test]
    async fn test_animated_resolution_cap() {
        let pipeline = FramePipeline::new();
        let seq = sequence(2, 0);
        let cfg = ConversionConfig {
            resolution: 300,
            ..config()
        };
        let err = pipeline.submit(&seq, cfg, |_| {}).await.unwrap_err();
        assert!(matches!(err, PipelineError::Settings(_)));
    }
}
