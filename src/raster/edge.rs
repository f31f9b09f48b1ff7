use crate::foundation::error::GardenResult;
use crate::raster::buffer::PixelBuffer;

/// Pixel value marking "inside the shape".
pub const SHAPE_RGBA: [u8; 4] = [0, 0, 0, 255];
/// Pixel value marking background.
pub const BACKGROUND_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Default luminance cutoff for [`EdgeMode::Threshold`].
pub const DEFAULT_CUTOFF: u8 = 128;
/// Default Sobel magnitude threshold for [`EdgeMode::Gradient`].
pub const DEFAULT_GRADIENT_THRESHOLD: f64 = 40.0;

fn default_cutoff() -> u8 {
    DEFAULT_CUTOFF
}

fn default_gradient_threshold() -> f64 {
    DEFAULT_GRADIENT_THRESHOLD
}

/// How a grayscale raster becomes a binary shape mask.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EdgeMode {
    /// Dark pixels (`luminance < cutoff`) are shape.
    Threshold {
        /// Luminance cutoff.
        #[serde(default = "default_cutoff")]
        cutoff: u8,
    },
    /// Pixels with a Sobel gradient magnitude above `threshold` are shape.
    Gradient {
        /// Magnitude threshold.
        #[serde(default = "default_gradient_threshold")]
        threshold: f64,
    },
}

impl Default for EdgeMode {
    fn default() -> Self {
        Self::threshold()
    }
}

impl EdgeMode {
    /// Threshold mode with the default cutoff.
    pub fn threshold() -> Self {
        Self::Threshold {
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Gradient mode with the default threshold.
    pub fn gradient() -> Self {
        Self::Gradient {
            threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

/// A raster whose pixels are exactly [`SHAPE_RGBA`] or [`BACKGROUND_RGBA`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    buf: PixelBuffer,
}

impl BinaryMask {
    /// Build a mask by evaluating `is_shape(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut is_shape: impl FnMut(u32, u32) -> bool,
    ) -> GardenResult<Self> {
        let mut buf = PixelBuffer::filled(width, height, BACKGROUND_RGBA)?;
        for y in 0..height {
            for x in 0..width {
                if is_shape(x, y) {
                    buf.set_pixel(x, y, SHAPE_RGBA);
                }
            }
        }
        Ok(Self { buf })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// `true` when `(x, y)` is a shape pixel.
    pub fn is_shape(&self, x: u32, y: u32) -> bool {
        self.buf.data()[self.buf.offset(x, y)] == 0
    }

    /// Signed lookup; out-of-bounds coordinates are background.
    pub fn is_shape_at(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return false;
        }
        self.is_shape(x as u32, y as u32)
    }

    /// Number of shape pixels.
    pub fn shape_count(&self) -> usize {
        self.buf
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] == 0)
            .count()
    }

    /// Borrow the underlying raster.
    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buf
    }

    /// Render the full mask as PNG for diagnostic display.
    pub fn to_png(&self) -> GardenResult<Vec<u8>> {
        self.buf.to_png()
    }
}

/// Turn a grayscale raster (R = G = B = luminance) into a [`BinaryMask`].
pub fn detect_edges(gray: &PixelBuffer, mode: EdgeMode) -> BinaryMask {
    let buf = match mode {
        EdgeMode::Threshold { cutoff } => threshold_mask(gray, cutoff),
        EdgeMode::Gradient { threshold } => gradient_mask(gray, threshold),
    };
    BinaryMask { buf }
}

fn threshold_mask(gray: &PixelBuffer, cutoff: u8) -> PixelBuffer {
    let mut out = gray.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        let rgba = if px[0] < cutoff {
            SHAPE_RGBA
        } else {
            BACKGROUND_RGBA
        };
        px.copy_from_slice(&rgba);
    }
    out
}

fn gradient_mask(gray: &PixelBuffer, threshold: f64) -> PixelBuffer {
    let (w, h) = (gray.width(), gray.height());
    let mut out = gray.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&BACKGROUND_RGBA);
    }
    if w < 3 || h < 3 {
        return out;
    }

    let lum = |x: u32, y: u32| -> f64 { f64::from(gray.data()[gray.offset(x, y)]) };
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let tl = lum(x - 1, y - 1);
            let tc = lum(x, y - 1);
            let tr = lum(x + 1, y - 1);
            let ml = lum(x - 1, y);
            let mr = lum(x + 1, y);
            let bl = lum(x - 1, y + 1);
            let bc = lum(x, y + 1);
            let br = lum(x + 1, y + 1);

            let gx = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            let gy = (bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr);
            if (gx * gx + gy * gy).sqrt() > threshold {
                out.set_pixel(x, y, SHAPE_RGBA);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/edge.rs"]
mod tests;
