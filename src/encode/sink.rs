use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{GardenError, GardenResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`StreamEncoder`] when a capture session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Nominal capture rate.
    pub fps: Fps,
    /// Encode an alpha channel (frames carry transparency).
    pub alpha: bool,
}

/// Encoder contract for a capture session.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`FrameIndex`] order and
/// chunks are returned in the order they were produced.
pub trait StreamEncoder {
    /// Acquire encoder resources. Must fail with [`GardenError::CaptureUnsupported`] before
    /// allocating anything when the runtime cannot encode.
    fn begin(&mut self, cfg: StreamConfig) -> GardenResult<()>;
    /// Submit one composited frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GardenResult<()>;
    /// Encoded chunks that became available since the last call.
    fn take_chunks(&mut self) -> Vec<Vec<u8>>;
    /// Flush the encoder and return any trailing chunks.
    fn finish(&mut self) -> GardenResult<Vec<Vec<u8>>>;
    /// Release everything without producing output. Safe to call more than once.
    fn abort(&mut self);
}

/// Encoder that emits each raw frame as one chunk, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    cfg: Option<StreamConfig>,
    pending: Vec<Vec<u8>>,
    last_idx: Option<FrameIndex>,
    frames: u64,
}

impl InMemoryEncoder {
    /// Create a new in-memory encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if still running.
    pub fn config(&self) -> Option<StreamConfig> {
        self.cfg
    }

    /// Frames accepted since `begin`.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl StreamEncoder for InMemoryEncoder {
    fn begin(&mut self, cfg: StreamConfig) -> GardenResult<()> {
        self.cfg = Some(cfg);
        self.pending.clear();
        self.last_idx = None;
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GardenResult<()> {
        if self.cfg.is_none() {
            return Err(GardenError::encoding_fault("in-memory encoder not started"));
        }
        check_order(&mut self.last_idx, idx)?;
        self.pending.push(frame.data.clone());
        self.frames += 1;
        Ok(())
    }

    fn take_chunks(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.pending)
    }

    fn finish(&mut self) -> GardenResult<Vec<Vec<u8>>> {
        if self.cfg.take().is_none() {
            return Err(GardenError::encoding_fault("in-memory encoder not started"));
        }
        Ok(self.take_chunks())
    }

    fn abort(&mut self) {
        self.cfg = None;
        self.pending.clear();
    }
}

pub(crate) fn check_order(last: &mut Option<FrameIndex>, idx: FrameIndex) -> GardenResult<()> {
    if let Some(prev) = *last
        && idx.0 <= prev.0
    {
        return Err(GardenError::encoding_fault(
            "encoder received out-of-order frame index",
        ));
    }
    *last = Some(idx);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
