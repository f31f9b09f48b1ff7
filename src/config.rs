use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::capture::session::CaptureOpts;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{GardenError, GardenResult};
use crate::raster::edge::EdgeMode;
use crate::render::composite::CompositorOpts;
use crate::scene::color::{ColorMode, Palette, parse_hex};
use crate::scene::ease::Ease;
use crate::scene::garden::GardenStyle;
use crate::shape::pipeline::{DEFAULT_MAX_DIMENSION, DEFAULT_TARGET_POINTS, ExtractOpts};
use crate::shape::sample::SamplerKind;

/// Largest recorded side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 4096;
/// Longest accepted recording, in seconds.
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// Everything a run can be configured with. Every field has a default.
///
/// Loaded from JSON; CLI flags override individual fields afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GardenConfig {
    /// Maximum number of shape points.
    pub target_points: usize,
    /// Point sampler.
    pub sampler: SamplerKind,
    /// Mask construction.
    pub edges: EdgeMode,
    /// Longer-side cap for the working raster.
    pub max_dimension: u32,
    /// Fixed seed for reproducible sampling and layout.
    pub seed: Option<u64>,
    /// Words cycled over the tokens.
    pub words: Vec<String>,
    /// How token colors are picked.
    pub color_mode: ColorMode,
    /// Base color for `single` mode, and the fallback for an empty custom palette.
    pub color: String,
    /// Hex palette for `custom` mode.
    pub custom_colors: Vec<String>,
    /// `"transparent"` or a hex color.
    pub background: String,
    /// Recording and travel length in seconds.
    pub duration_secs: f64,
    /// Capture rate.
    pub fps: u32,
    /// Recording width in pixels.
    pub width: u32,
    /// Recording height in pixels.
    pub height: u32,
    /// Travel easing.
    pub ease: Ease,
    /// Snapshot failures tolerated in a row.
    pub max_consecutive_failures: u32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            target_points: DEFAULT_TARGET_POINTS,
            sampler: SamplerKind::default(),
            edges: EdgeMode::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            seed: None,
            words: ["word", "garden", "grow", "bloom"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            color_mode: ColorMode::Single,
            color: "#90ee90".to_string(),
            custom_colors: Vec::new(),
            background: "transparent".to_string(),
            duration_secs: 5.0,
            fps: 30,
            width: 800,
            height: 600,
            ease: Ease::default(),
            max_consecutive_failures: 0,
        }
    }
}

impl GardenConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> GardenResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Parse a JSON config string.
    pub fn from_json_str(s: &str) -> GardenResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse config JSON")?;
        Ok(cfg)
    }

    /// Check every field range.
    pub fn validate(&self) -> GardenResult<()> {
        self.extract_opts().validate()?;
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(GardenError::validation("duration_secs must be > 0"));
        }
        if self.duration_secs > MAX_DURATION_SECS {
            return Err(GardenError::validation(format!(
                "duration_secs must be <= {MAX_DURATION_SECS}"
            )));
        }
        if self.fps == 0 {
            return Err(GardenError::validation("fps must be > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GardenError::validation("width/height must be > 0"));
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(GardenError::validation(format!(
                "width/height must be <= {MAX_CANVAS_SIDE}"
            )));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(GardenError::validation(
                "width/height must be even for video encoding",
            ));
        }
        if self.words.iter().all(|w| w.trim().is_empty()) {
            return Err(GardenError::validation("words must contain at least one word"));
        }
        self.background_rgba()?;
        Ok(())
    }

    /// Options for the shape extractor.
    pub fn extract_opts(&self) -> ExtractOpts {
        ExtractOpts {
            target_points: self.target_points,
            sampler: self.sampler,
            edges: self.edges,
            max_dimension: self.max_dimension,
        }
    }

    /// Stage color; `None` means transparent.
    pub fn background_rgba(&self) -> GardenResult<Option<[u8; 4]>> {
        let bg = self.background.trim();
        if bg.eq_ignore_ascii_case("transparent") {
            return Ok(None);
        }
        let [r, g, b] = parse_hex(bg).ok_or_else(|| {
            GardenError::validation(format!(
                "background must be 'transparent' or a hex color, got '{bg}'"
            ))
        })?;
        Ok(Some([r, g, b, 255]))
    }

    /// Recording canvas.
    pub fn canvas(&self) -> GardenResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Options for a capture session.
    pub fn capture_opts(&self) -> GardenResult<CaptureOpts> {
        let compositor = match self.background_rgba()? {
            None => CompositorOpts::default(),
            Some(rgba) => CompositorOpts {
                preserve_transparency: false,
                background_rgba: rgba,
            },
        };
        Ok(CaptureOpts {
            canvas: self.canvas()?,
            fps: Fps::new(self.fps, 1)?,
            duration: Duration::try_from_secs_f64(self.duration_secs).map_err(|e| {
                GardenError::validation(format!(
                    "duration_secs {} is not a valid duration: {e}",
                    self.duration_secs
                ))
            })?,
            compositor,
            max_consecutive_failures: self.max_consecutive_failures,
        })
    }

    /// Resolved token palette.
    pub fn palette(&self) -> Palette {
        Palette::new(self.color_mode, &self.color, &self.custom_colors)
    }

    /// Scene drawing settings.
    pub fn garden_style(&self) -> GardenResult<GardenStyle> {
        Ok(GardenStyle {
            canvas: self.canvas()?,
            duration_secs: self.duration_secs,
            ease: self.ease,
            background: self.background_rgba()?,
        })
    }

    /// Non-blank words, trimmed.
    pub fn word_list(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
