use rand::Rng;
use rand::seq::SliceRandom as _;

use crate::foundation::core::{NORM_MAX, Point, normalize_px};
use crate::foundation::rng::uniform;
use crate::raster::edge::BinaryMask;
use crate::shape::polygon::Polygon;

/// Rejection sampling gives up after `REJECTION_ATTEMPT_FACTOR * target` draws.
pub const REJECTION_ATTEMPT_FACTOR: usize = 10;

/// Point sampling strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// Stride scan over the mask, keeping shape pixels. O(pixels).
    #[default]
    Direct,
    /// Uniform draws in the contour's bounding box, kept when inside the contour.
    /// O(attempts x edges).
    Rejection,
}

impl SamplerKind {
    /// Whether this strategy needs a traced contour.
    pub fn needs_contour(self) -> bool {
        matches!(self, Self::Rejection)
    }
}

/// Points produced by a sampler plus bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleReport {
    /// Sampled normalized points, never more than the target.
    pub points: Vec<Point>,
    /// Candidate evaluations (stride cells for direct, draws for rejection).
    pub attempts: usize,
    /// Points added as uniform random padding (direct sampling only).
    pub padded: usize,
}

/// Stride used by [`sample_direct`]: `max(1, floor(sqrt(w * h / target)))`.
pub fn direct_stride(width: u32, height: u32, target: usize) -> u32 {
    if target == 0 {
        return 1;
    }
    let area = f64::from(width) * f64::from(height);
    ((area / target as f64).sqrt().floor() as u32).max(1)
}

/// Grid-stride scan of `mask`, keeping shape pixels.
///
/// When more than `target` pixels qualify, a random subset of `target` is kept. When some but
/// fewer than half of `target` qualify, the remainder is padded with uniform random points so the
/// animation always has enough destinations. An all-background mask yields no points.
pub fn sample_direct<R: Rng + ?Sized>(
    mask: &BinaryMask,
    target: usize,
    rng: &mut R,
) -> SampleReport {
    let (w, h) = (mask.width(), mask.height());
    let stride = direct_stride(w, h, target) as usize;

    let mut points = Vec::new();
    let mut attempts = 0usize;
    for y in (0..h).step_by(stride) {
        for x in (0..w).step_by(stride) {
            attempts += 1;
            if mask.is_shape(x, y) {
                points.push(normalize_px(f64::from(x), f64::from(y), w, h));
            }
        }
    }

    if points.len() > target {
        let (chosen, _) = points.partial_shuffle(rng, target);
        points = chosen.to_vec();
    }

    let found = points.len();
    let mut padded = 0;
    if found > 0 && found.saturating_mul(2) < target {
        padded = target - found;
        tracing::warn!(found, target, padded, "sparse shape, padding with random points");
        for _ in 0..padded {
            points.push(Point::new(
                uniform(rng, 0.0, NORM_MAX),
                uniform(rng, 0.0, NORM_MAX),
            ));
        }
    }

    tracing::debug!(stride, found, padded, "direct sampling done");
    SampleReport {
        points,
        attempts,
        padded,
    }
}

/// Uniform rejection sampling inside `polygon`.
///
/// Stops after `target` accepted points or `10 * target` attempts, whichever comes first, so a
/// zero-area polygon terminates with fewer points. An empty polygon yields nothing.
pub fn sample_rejection<R: Rng + ?Sized>(
    polygon: &Polygon,
    target: usize,
    rng: &mut R,
) -> SampleReport {
    let Some(bounds) = polygon.bounds() else {
        return SampleReport::default();
    };

    let max_attempts = target.saturating_mul(REJECTION_ATTEMPT_FACTOR);
    let mut points = Vec::with_capacity(target);
    let mut attempts = 0usize;
    while points.len() < target && attempts < max_attempts {
        attempts += 1;
        let p = Point::new(
            uniform(rng, bounds.x0, bounds.x1),
            uniform(rng, bounds.y0, bounds.y1),
        );
        if polygon.contains(p) {
            points.push(p);
        }
    }

    tracing::debug!(accepted = points.len(), attempts, "rejection sampling done");
    SampleReport {
        points,
        attempts,
        padded: 0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/sample.rs"]
mod tests;
