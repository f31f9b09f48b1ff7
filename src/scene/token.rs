use std::f64::consts::TAU;

use rand::Rng;

use crate::foundation::core::{Canvas, NORM_MAX, Point};
use crate::foundation::rng::uniform;
use crate::scene::color::Palette;
use crate::scene::ease::{CubicBezier, Ease};

/// Targets stay this many pixels inside the canvas edge.
pub const EDGE_MARGIN_PX: f64 = 5.0;
/// Scale every token starts from.
pub const START_SCALE: f64 = 0.1;
/// Opacity every token settles at.
pub const FINAL_OPACITY: f64 = 0.85;
/// Fraction of the duration spent fading in (and the spread of start delays).
pub const FADE_FRACTION: f64 = 0.6;

const JITTER_PX: f64 = 2.5;

/// One word travelling from an offscreen start to a shape point.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordToken {
    /// Text carried by the token.
    pub word: String,
    /// Start position in canvas pixels (usually offscreen).
    pub start: Point,
    /// Landing position in canvas pixels.
    pub target: Point,
    /// Nominal font size in pixels.
    pub font_size: f64,
    /// Scale reached on landing.
    pub final_scale: f64,
    /// Seconds before the token starts moving.
    pub delay_secs: f64,
    /// Straight-alpha RGBA.
    pub color: [u8; 4],
}

/// Where a token is at some point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenPose {
    /// Center in canvas pixels.
    pub center: Point,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, FINAL_OPACITY]`.
    pub opacity: f64,
}

impl WordToken {
    /// Pose at `t_secs` after the animation start.
    pub fn pose(&self, t_secs: f64, duration_secs: f64, ease: Ease) -> TokenPose {
        let local = (t_secs - self.delay_secs).max(0.0);
        let p = if duration_secs > 0.0 {
            ease.apply(local / duration_secs)
        } else {
            1.0
        };
        let fade = if duration_secs > 0.0 {
            CubicBezier::EASE_OUT.apply(local / (duration_secs * FADE_FRACTION))
        } else {
            1.0
        };
        TokenPose {
            center: self.start.lerp(self.target, p),
            scale: START_SCALE + (self.final_scale - START_SCALE) * p,
            opacity: FINAL_OPACITY * fade,
        }
    }

    /// Chip size at scale 1: roughly one em-width per character by a line height.
    pub fn chip_size(&self) -> (f64, f64) {
        let chars = self.word.chars().count().max(1) as f64;
        (self.font_size * (0.6 * chars + 0.5), self.font_size * 1.2)
    }
}

/// Build one token per shape point, cycling through `words`.
///
/// `points` are normalized to `[0, 100]`. Returns nothing when either input is empty.
pub fn layout_tokens<R: Rng + ?Sized>(
    points: &[Point],
    words: &[String],
    palette: &Palette,
    canvas: Canvas,
    duration_secs: f64,
    rng: &mut R,
) -> Vec<WordToken> {
    if points.is_empty() || words.is_empty() {
        return Vec::new();
    }

    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let center = Point::new(w / 2.0, h / 2.0);
    let clamp_x = |x: f64| x.min(w - EDGE_MARGIN_PX).max(EDGE_MARGIN_PX);
    let clamp_y = |y: f64| y.min(h - EDGE_MARGIN_PX).max(EDGE_MARGIN_PX);

    let tokens: Vec<WordToken> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let angle = uniform(rng, 0.0, TAU);
            let radius = w.max(h) * uniform(rng, 0.6, 0.9);
            let start = Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            );

            let jx = uniform(rng, -JITTER_PX, JITTER_PX);
            let jy = uniform(rng, -JITTER_PX, JITTER_PX);
            let target = Point::new(
                clamp_x(p.x / NORM_MAX * w + jx),
                clamp_y(p.y / NORM_MAX * h + jy),
            );

            let font_size = uniform(rng, 9.0, 17.0);
            let final_scale = uniform(rng, 0.65, 0.95);
            let delay_secs = uniform(rng, 0.0, duration_secs * FADE_FRACTION);
            let color = palette.pick(i, rng);

            WordToken {
                word: words[i % words.len()].clone(),
                start,
                target,
                font_size,
                final_scale,
                delay_secs,
                color,
            }
        })
        .collect();

    tracing::debug!(tokens = tokens.len(), w = canvas.width, h = canvas.height, "laid out tokens");
    tokens
}

#[cfg(test)]
#[path = "../../tests/unit/scene/token.rs"]
mod tests;
