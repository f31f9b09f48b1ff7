use rand::Rng;

use crate::foundation::core::Point;
use crate::foundation::error::{GardenError, GardenResult};
use crate::raster::buffer::PixelBuffer;
use crate::raster::edge::{BinaryMask, EdgeMode, detect_edges};
use crate::raster::gray::grayscale;
use crate::shape::contour::trace_contour;
use crate::shape::polygon::Polygon;
use crate::shape::sample::{SampleReport, SamplerKind, sample_direct, sample_rejection};

/// Longer-side cap applied before processing.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;
/// Default number of points requested from the sampler.
pub const DEFAULT_TARGET_POINTS: usize = 500;

/// Options for [`ShapeExtractor`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExtractOpts {
    /// Maximum number of interior points.
    pub target_points: usize,
    /// Sampling strategy.
    pub sampler: SamplerKind,
    /// Mask construction.
    pub edges: EdgeMode,
    /// Longer-side cap for the working raster.
    pub max_dimension: u32,
}

impl Default for ExtractOpts {
    fn default() -> Self {
        Self {
            target_points: DEFAULT_TARGET_POINTS,
            sampler: SamplerKind::default(),
            edges: EdgeMode::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl ExtractOpts {
    /// Validate option ranges.
    pub fn validate(&self) -> GardenResult<()> {
        if self.target_points == 0 {
            return Err(GardenError::validation("target_points must be >= 1"));
        }
        if self.max_dimension == 0 {
            return Err(GardenError::validation("max_dimension must be >= 1"));
        }
        Ok(())
    }
}

/// Result of one extraction run. Immutable once built.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ShapeExtraction {
    /// Width of the working raster (after resizing).
    pub width: u32,
    /// Height of the working raster (after resizing).
    pub height: u32,
    /// Normalized interior points.
    pub internal_points: Vec<Point>,
    /// Traced boundary; empty unless the sampler needed it.
    pub contour_points: Vec<Point>,
    /// PNG rendering of the full binary mask.
    #[serde(skip)]
    pub visualization_png: Vec<u8>,
    /// Candidate evaluations made by the sampler.
    pub attempts: usize,
    /// Points that came from random padding.
    pub padded: usize,
}

impl ShapeExtraction {
    /// `true` when the image produced no points; callers should ask for a different image.
    pub fn no_shape_detected(&self) -> bool {
        self.internal_points.is_empty()
    }
}

/// Runs decode -> resize -> grayscale -> edges -> (contour) -> sampling.
///
/// Holds only options; every call owns its intermediate rasters.
#[derive(Clone, Debug, Default)]
pub struct ShapeExtractor {
    opts: ExtractOpts,
}

impl ShapeExtractor {
    /// Create an extractor after validating `opts`.
    pub fn new(opts: ExtractOpts) -> GardenResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &ExtractOpts {
        &self.opts
    }

    /// Decode encoded image bytes and extract points.
    #[tracing::instrument(skip(self, bytes, rng), fields(len = bytes.len()))]
    pub fn extract<R: Rng + ?Sized>(
        &self,
        bytes: &[u8],
        rng: &mut R,
    ) -> GardenResult<ShapeExtraction> {
        let decoded = PixelBuffer::decode(bytes)?;
        self.extract_buffer(decoded, rng)
    }

    /// Extract points from an already decoded raster.
    pub fn extract_buffer<R: Rng + ?Sized>(
        &self,
        src: PixelBuffer,
        rng: &mut R,
    ) -> GardenResult<ShapeExtraction> {
        let working = src.fit_within(self.opts.max_dimension)?;
        let gray = grayscale(&working);
        drop(working);
        let mask = detect_edges(&gray, self.opts.edges);
        drop(gray);

        let (contour, report) = self.sample(&mask, rng);
        let visualization_png = mask.to_png()?;

        let out = ShapeExtraction {
            width: mask.width(),
            height: mask.height(),
            internal_points: report.points,
            contour_points: contour.into_points(),
            visualization_png,
            attempts: report.attempts,
            padded: report.padded,
        };
        tracing::info!(
            points = out.internal_points.len(),
            contour = out.contour_points.len(),
            w = out.width,
            h = out.height,
            "shape extracted"
        );
        if out.no_shape_detected() {
            tracing::warn!("no shape detected");
        }
        Ok(out)
    }

    fn sample<R: Rng + ?Sized>(&self, mask: &BinaryMask, rng: &mut R) -> (Polygon, SampleReport) {
        let target = self.opts.target_points;
        match self.opts.sampler {
            SamplerKind::Direct => (Polygon::default(), sample_direct(mask, target, rng)),
            SamplerKind::Rejection => {
                let contour = trace_contour(mask);
                let report = sample_rejection(&contour, target, rng);
                (contour, report)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/pipeline.rs"]
mod tests;
