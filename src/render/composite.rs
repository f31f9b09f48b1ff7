use crate::foundation::error::{GardenError, GardenResult};
use crate::foundation::math::{mul_div255_u8, premul_rgba8};
use crate::render::frame::FrameRGBA;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over of a whole premultiplied buffer onto `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> GardenResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(GardenError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// How the accumulation surface is reset before every draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositorOpts {
    /// Keep alpha (clear to transparent) instead of flattening over `background_rgba`.
    pub preserve_transparency: bool,
    /// Straight-alpha background used when flattening; alpha is forced to 255.
    pub background_rgba: [u8; 4],
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            preserve_transparency: true,
            background_rgba: [0, 0, 0, 255],
        }
    }
}

/// Draws captured snapshots onto a persistent surface owned by one capture session.
///
/// The surface is reset before each draw so nothing from the previous frame bleeds through.
pub struct Compositor {
    surface: FrameRGBA,
    clear_px: PremulRgba8,
    scratch: Vec<u8>,
}

impl Compositor {
    /// Allocate a `width x height` accumulation surface.
    pub fn new(width: u32, height: u32, opts: CompositorOpts) -> GardenResult<Self> {
        if width == 0 || height == 0 {
            return Err(GardenError::validation(
                "compositor width/height must be non-zero",
            ));
        }
        let clear_px = if opts.preserve_transparency {
            [0, 0, 0, 0]
        } else {
            let [r, g, b, _] = opts.background_rgba;
            premul_rgba8(r, g, b, 255)
        };
        Ok(Self {
            surface: FrameRGBA::transparent(width, height),
            clear_px,
            scratch: Vec::new(),
        })
    }

    /// Current surface contents.
    pub fn surface(&self) -> &FrameRGBA {
        &self.surface
    }

    /// Reset the surface and draw `snapshot` over it.
    pub fn draw(&mut self, snapshot: &FrameRGBA) -> GardenResult<&FrameRGBA> {
        snapshot.validate()?;
        if snapshot.width != self.surface.width || snapshot.height != self.surface.height {
            return Err(GardenError::validation(format!(
                "snapshot size mismatch: got {}x{}, expected {}x{}",
                snapshot.width, snapshot.height, self.surface.width, self.surface.height
            )));
        }

        for px in self.surface.data.chunks_exact_mut(4) {
            px.copy_from_slice(&self.clear_px);
        }

        let src = if snapshot.premultiplied {
            snapshot.data.as_slice()
        } else {
            self.scratch.clear();
            self.scratch.extend(
                snapshot
                    .data
                    .chunks_exact(4)
                    .flat_map(|s| premul_rgba8(s[0], s[1], s[2], s[3])),
            );
            self.scratch.as_slice()
        };
        over_in_place(&mut self.surface.data, src)?;
        Ok(&self.surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
