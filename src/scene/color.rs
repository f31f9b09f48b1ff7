use rand::Rng;

use crate::foundation::rng::uniform;

/// Fallback when a configured color cannot be parsed (light green).
pub const FALLBACK_RGB: [u8; 3] = [144, 238, 144];

const GOLDEN_ANGLE_DEG: f64 = 137.508;

/// How token colors are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// One base color with random alpha.
    #[default]
    Single,
    /// Hues spread by the golden angle.
    Rainbow,
    /// Cycle through a user palette.
    Custom,
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some([nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?]),
        _ => None,
    }
}

/// [`parse_hex`] with the light-green fallback.
pub fn hex_or_fallback(s: &str) -> [u8; 3] {
    parse_hex(s).unwrap_or_else(|| {
        tracing::warn!(color = s, "unparseable color; using fallback");
        FALLBACK_RGB
    })
}

/// HSL to RGB. `h` in degrees, `s` and `l` in `[0, 1]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return [v, v, v];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f64| -> u8 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

/// Resolved colors for a layout run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    mode: ColorMode,
    base: [u8; 3],
    custom: Vec<[u8; 3]>,
}

impl Palette {
    /// Resolve hex strings once; unparseable entries fall back to light green.
    pub fn new(mode: ColorMode, base: &str, custom: &[String]) -> Self {
        Self {
            mode,
            base: hex_or_fallback(base),
            custom: custom.iter().map(|c| hex_or_fallback(c)).collect(),
        }
    }

    /// Straight-alpha RGBA for token `index`. Alpha is drawn from `[0.7, 1.0)`.
    pub fn pick<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> [u8; 4] {
        let [r, g, b] = match self.mode {
            ColorMode::Rainbow => hsl_to_rgb((index as f64) * GOLDEN_ANGLE_DEG, 0.7, 0.6),
            ColorMode::Custom if !self.custom.is_empty() => self.custom[index % self.custom.len()],
            ColorMode::Single | ColorMode::Custom => self.base,
        };
        let alpha = uniform(rng, 0.7, 1.0);
        [r, g, b, (alpha * 255.0).round() as u8]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
