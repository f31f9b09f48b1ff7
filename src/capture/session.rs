use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::capture::clock::Clock;
use crate::capture::surface::DisplaySurface;
use crate::encode::sink::{StreamConfig, StreamEncoder};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{GardenError, GardenResult};
use crate::render::composite::{Compositor, CompositorOpts};

/// Recordings smaller than this are treated as broken.
pub const MIN_ARTIFACT_BYTES: usize = 1024;

/// Lifecycle of a [`CaptureSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CaptureState {
    /// Created, nothing acquired.
    Idle,
    /// Encoder begun and surface allocated; clock not started.
    Armed,
    /// Frames are being captured.
    Sampling,
    /// Duration elapsed; waiting for the encoder to flush.
    Draining,
    /// Artifact produced.
    Done,
    /// Aborted by a fault or a cancel.
    Failed,
}

impl CaptureState {
    /// `Done` or `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Options for one recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Output size.
    pub canvas: Canvas,
    /// Nominal capture rate.
    pub fps: Fps,
    /// Wall-clock length of the recording.
    pub duration: Duration,
    /// Surface reset behavior.
    pub compositor: CompositorOpts,
    /// Snapshot failures tolerated in a row before the session fails.
    pub max_consecutive_failures: u32,
}

impl CaptureOpts {
    /// Check sizes, rate and duration.
    pub fn validate(&self) -> GardenResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GardenError::validation("capture canvas must be non-empty"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(GardenError::validation("capture fps must be > 0"));
        }
        if self.duration.is_zero() {
            return Err(GardenError::validation("capture duration must be > 0"));
        }
        Ok(())
    }

    /// Frames a perfectly paced capture would produce.
    pub fn frame_budget(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.duration.as_secs_f64())
    }
}

/// Finished recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name (`word-cloud-<unix-millis>.webm`).
    pub file_name: String,
    /// Encoded container bytes.
    pub bytes: Vec<u8>,
    /// Frames pushed to the encoder.
    pub frames: u64,
    /// Sampling time, from start to the transition into draining.
    pub elapsed: Duration,
}

/// Result of one [`CaptureSession::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was composited and encoded.
    Captured(FrameIndex),
    /// The snapshot failed but the session tolerated it.
    Skipped,
    /// The duration elapsed; call `finish`.
    Draining,
}

/// One recording: owns the encoder, the accumulation surface and the collected chunks.
pub struct CaptureSession {
    opts: CaptureOpts,
    state: CaptureState,
    encoder: Box<dyn StreamEncoder>,
    clock: Rc<dyn Clock>,
    compositor: Option<Compositor>,
    chunks: Vec<Vec<u8>>,
    frame_count: u64,
    ticks: u64,
    consecutive_failures: u32,
    started_at: Option<Duration>,
    sampled_for: Duration,
    released: bool,
}

impl CaptureSession {
    /// Create an idle session.
    pub fn new(
        opts: CaptureOpts,
        encoder: Box<dyn StreamEncoder>,
        clock: Rc<dyn Clock>,
    ) -> GardenResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            state: CaptureState::Idle,
            encoder,
            clock,
            compositor: None,
            chunks: Vec::new(),
            frame_count: 0,
            ticks: 0,
            consecutive_failures: 0,
            started_at: None,
            sampled_for: Duration::ZERO,
            released: false,
        })
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Options this session was created with.
    pub fn opts(&self) -> &CaptureOpts {
        &self.opts
    }

    /// Frames pushed to the encoder so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time since sampling started (zero before `start`).
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(t0) => self.clock.now().saturating_sub(t0),
            None => Duration::ZERO,
        }
    }

    /// When the next tick is due, relative to the sampling start.
    pub fn next_due(&self) -> Duration {
        Duration::from_secs(self.ticks * u64::from(self.opts.fps.den)) / self.opts.fps.num
    }

    /// Acquire the encoder and surface, then start the clock.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> GardenResult<()> {
        if self.state != CaptureState::Idle {
            return Err(GardenError::capture_busy(format!(
                "session cannot start from {:?}",
                self.state
            )));
        }

        let cfg = StreamConfig {
            width: self.opts.canvas.width,
            height: self.opts.canvas.height,
            fps: self.opts.fps,
            alpha: self.opts.compositor.preserve_transparency,
        };
        if let Err(e) = self.encoder.begin(cfg) {
            self.fail();
            return Err(e);
        }
        match Compositor::new(cfg.width, cfg.height, self.opts.compositor) {
            Ok(c) => self.compositor = Some(c),
            Err(e) => {
                self.fail();
                return Err(e);
            }
        }
        self.state = CaptureState::Armed;

        self.started_at = Some(self.clock.now());
        self.state = CaptureState::Sampling;
        tracing::info!(
            fps = self.opts.fps.as_f64(),
            duration_s = self.opts.duration.as_secs_f64(),
            "capture started"
        );
        Ok(())
    }

    /// Capture one frame, or move to `Draining` once the duration has elapsed.
    pub fn tick(&mut self, surface: &mut dyn DisplaySurface) -> GardenResult<TickOutcome> {
        match self.state {
            CaptureState::Sampling => {}
            CaptureState::Draining => return Ok(TickOutcome::Draining),
            other => {
                return Err(GardenError::validation(format!(
                    "tick called in state {other:?}"
                )));
            }
        }

        let elapsed = self.elapsed();
        if elapsed >= self.opts.duration {
            self.sampled_for = elapsed;
            self.state = CaptureState::Draining;
            tracing::debug!(frames = self.frame_count, "capture draining");
            return Ok(TickOutcome::Draining);
        }

        self.ticks += 1;
        let (w, h) = (self.opts.canvas.width, self.opts.canvas.height);
        let snapshot = match surface.render_snapshot(w, h) {
            Ok(s) => s,
            Err(e) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures > self.opts.max_consecutive_failures {
                    tracing::error!(error = %e, "snapshot failed");
                    self.fail();
                    return Err(GardenError::encoding_fault(format!("snapshot failed: {e}")));
                }
                tracing::warn!(
                    error = %e,
                    failures = self.consecutive_failures,
                    "snapshot failed; skipping frame"
                );
                return Ok(TickOutcome::Skipped);
            }
        };
        self.consecutive_failures = 0;

        let idx = FrameIndex(self.frame_count);
        if let Err(e) = self.composite_and_push(idx, &snapshot) {
            self.fail();
            return Err(e);
        }
        self.frame_count += 1;
        self.chunks.extend(self.encoder.take_chunks());
        Ok(TickOutcome::Captured(idx))
    }

    fn composite_and_push(
        &mut self,
        idx: FrameIndex,
        snapshot: &crate::render::frame::FrameRGBA,
    ) -> GardenResult<()> {
        let compositor = self
            .compositor
            .as_mut()
            .ok_or_else(|| GardenError::encoding_fault("accumulation surface released"))?;
        let frame = compositor
            .draw(snapshot)
            .map_err(|e| GardenError::encoding_fault(format!("composite failed: {e}")))?;
        self.encoder.push_frame(idx, frame)
    }

    /// Flush the encoder and assemble the artifact.
    ///
    /// Valid while `Sampling` (forces the drain) or `Draining`.
    pub fn finish(&mut self) -> GardenResult<Artifact> {
        match self.state {
            CaptureState::Sampling => {
                self.sampled_for = self.elapsed();
                self.state = CaptureState::Draining;
            }
            CaptureState::Draining => {}
            other => {
                return Err(GardenError::validation(format!(
                    "finish called in state {other:?}"
                )));
            }
        }

        let tail = match self.encoder.finish() {
            Ok(tail) => tail,
            Err(e) => {
                self.fail();
                return Err(e);
            }
        };
        self.chunks.extend(tail);

        let bytes = self.chunks.concat();
        if bytes.len() < MIN_ARTIFACT_BYTES {
            self.fail();
            return Err(GardenError::EncodingTooSmall {
                bytes: bytes.len(),
                floor: MIN_ARTIFACT_BYTES,
            });
        }

        self.state = CaptureState::Done;
        self.release();
        let artifact = Artifact {
            file_name: artifact_file_name(SystemTime::now()),
            bytes,
            frames: self.frame_count,
            elapsed: self.sampled_for,
        };
        tracing::info!(
            frames = artifact.frames,
            bytes = artifact.bytes.len(),
            file = %artifact.file_name,
            "capture finished"
        );
        Ok(artifact)
    }

    /// Abort the session. Safe to call in any state, any number of times.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            tracing::info!(state = ?self.state, "capture cancelled");
            self.state = CaptureState::Failed;
        }
        self.release();
    }

    fn fail(&mut self) {
        self.state = CaptureState::Failed;
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if self.state == CaptureState::Failed {
            self.encoder.abort();
            self.chunks.clear();
        }
        self.compositor = None;
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// `word-cloud-<unix-millis>.webm`.
pub fn artifact_file_name(at: SystemTime) -> String {
    let millis = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("word-cloud-{millis}.webm")
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
