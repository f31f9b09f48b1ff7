//! Stream encoders.
//!
//! Encoders consume composited frames in capture order and hand back encoded chunks in the same
//! order; the capture session concatenates them into the final artifact.

/// `ffmpeg`-based encoder (VP9/WebM via system `ffmpeg`).
pub mod ffmpeg;
/// Encoder trait and the in-memory encoder.
pub mod sink;
