use crate::foundation::error::{GardenError, GardenResult};

/// A captured bitmap as RGBA8 pixels.
///
/// Snapshots from the built-in scene are **premultiplied alpha**; the flag makes this explicit at
/// API boundaries so encoders can convert as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent premultiplied frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> GardenResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(GardenError::validation(format!(
                "frame data length {} does not match {}x{}x4",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}
