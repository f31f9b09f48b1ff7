use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{GardenError, GardenResult};

/// Dense row-major straight-alpha RGBA8 raster.
///
/// Invariant: `data.len() == width * height * 4` and both dimensions are non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, validating the length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> GardenResult<Self> {
        if width == 0 || height == 0 {
            return Err(GardenError::validation(
                "pixel buffer width/height must be non-zero",
            ));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(GardenError::validation(format!(
                "pixel buffer data length {} does not match {width}x{height}x4 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> GardenResult<Self> {
        let px = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(px * 4);
        for _ in 0..px {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    /// Decode any format supported by `image` into straight RGBA8.
    pub fn decode(bytes: &[u8]) -> GardenResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| GardenError::image_decode(format!("decode image from memory: {e}")))?;
        Self::from_rgba_image(dyn_img.to_rgba8())
            .map_err(|e| GardenError::image_decode(e.to_string()))
    }

    /// Take ownership of an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> GardenResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 bytes, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA8 bytes, tightly packed.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read pixel `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite pixel `(x, y)`. Panics when out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Downscale so the longer side is at most `max_dim`, preserving aspect ratio.
    ///
    /// Buffers already within bounds are returned unchanged.
    pub fn fit_within(self, max_dim: u32) -> GardenResult<Self> {
        let (w, h) = fit_dimensions(self.width, self.height, max_dim);
        if (w, h) == (self.width, self.height) {
            return Ok(self);
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| GardenError::validation("pixel buffer does not form an rgba image"))?;
        let resized = image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle);
        tracing::debug!(from_w = self.width, from_h = self.height, w, h, "resized input");
        Self::from_rgba_image(resized)
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> GardenResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| GardenError::validation("pixel buffer does not form an rgba image"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

/// Target size after capping the longer side at `max_dim` (floor, never below 1).
pub fn fit_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let max_dim = max_dim.max(1);
    let scaled = |side: u32, long: u32| -> u32 {
        let v = (f64::from(side) * (f64::from(max_dim) / f64::from(long))).floor() as u32;
        v.max(1)
    };
    if width > height && width > max_dim {
        (max_dim, scaled(height, width))
    } else if height >= width && height > max_dim {
        (scaled(width, height), max_dim)
    } else {
        (width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
