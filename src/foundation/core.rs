use crate::foundation::error::{GardenError, GardenResult};

pub use kurbo::{Point, Rect};

/// Upper bound of the normalized coordinate space (points live in `[0, NORM_MAX]`).
pub const NORM_MAX: f64 = 100.0;

/// Absolute 0-based index of a captured frame, in capture order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> GardenResult<Self> {
        if den == 0 {
            return Err(GardenError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GardenError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> GardenResult<Self> {
        if width == 0 || height == 0 {
            return Err(GardenError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Clamp a coordinate into the normalized `[0, 100]` range.
pub fn clamp_norm(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, NORM_MAX)
}

/// Map pixel coordinates of a `width x height` raster into normalized space.
pub fn normalize_px(x: f64, y: f64, width: u32, height: u32) -> Point {
    Point::new(
        clamp_norm(x / f64::from(width) * NORM_MAX),
        clamp_norm(y / f64::from(height) * NORM_MAX),
    )
}

/// Return `true` when both coordinates are within `[0, 100]`.
pub fn is_normalized(p: Point) -> bool {
    (0.0..=NORM_MAX).contains(&p.x) && (0.0..=NORM_MAX).contains(&p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
