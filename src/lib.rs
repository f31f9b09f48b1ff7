//! wordgarden turns an image into a field of shape points and records words flying into it.
//!
//! Two independent pipelines:
//!
//! - Shape extraction: decode, resize, grayscale, edge mask, optional contour, then sample a
//!   bounded set of points normalized to `[0, 100]` ([`ShapeExtractor`]).
//! - Capture: sample a [`DisplaySurface`] at a fixed rate for a fixed duration, composite every
//!   snapshot and stream it into a [`StreamEncoder`], producing one WebM [`Artifact`]
//!   ([`Recorder`], [`CaptureSession`]).
//!
//! The bundled [`WordGarden`] scene connects the two.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Fixed-rate capture sessions and the recorder that drives them.
pub mod capture;
/// JSON configuration.
pub mod config;
/// Encoded stream sinks.
pub mod encode;
/// Pixel buffers, grayscale and edge masks.
pub mod raster;
/// Frames and compositing.
pub mod render;
/// The word garden scene.
pub mod scene;
/// Contours, polygons, samplers and the extraction pipeline.
pub mod shape;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, NORM_MAX, Point, Rect};
pub use crate::foundation::error::{ErrorKind, GardenError, GardenResult};
pub use crate::foundation::rng::garden_rng;

pub use crate::capture::clock::{Clock, ManualClock, SystemClock};
pub use crate::capture::recorder::{CaptureObserver, LogObserver, Recorder};
pub use crate::capture::session::{
    Artifact, CaptureOpts, CaptureSession, CaptureState, MIN_ARTIFACT_BYTES, TickOutcome,
};
pub use crate::capture::surface::{DisplaySurface, StaticSurface};
pub use crate::config::GardenConfig;
pub use crate::encode::ffmpeg::{FfmpegStreamEncoder, FfmpegStreamOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{InMemoryEncoder, StreamConfig, StreamEncoder};
pub use crate::raster::buffer::PixelBuffer;
pub use crate::raster::edge::{BinaryMask, EdgeMode};
pub use crate::render::composite::{Compositor, CompositorOpts};
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::color::{ColorMode, Palette};
pub use crate::scene::ease::{CubicBezier, Ease};
pub use crate::scene::garden::{GardenStyle, WordGarden};
pub use crate::scene::token::{WordToken, layout_tokens};
pub use crate::shape::pipeline::{ExtractOpts, ShapeExtraction, ShapeExtractor};
pub use crate::shape::polygon::Polygon;
pub use crate::shape::sample::SamplerKind;
