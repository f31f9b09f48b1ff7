use crate::foundation::error::GardenResult;
use crate::render::frame::FrameRGBA;

/// Something that can be snapshotted into a bitmap at a requested size.
///
/// Implementations return either a premultiplied or a straight-alpha frame (flagged on the
/// [`FrameRGBA`]); the compositor normalizes both.
pub trait DisplaySurface {
    /// Render the current visual state at `width x height`.
    fn render_snapshot(&mut self, width: u32, height: u32) -> GardenResult<FrameRGBA>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn render_snapshot(&mut self, width: u32, height: u32) -> GardenResult<FrameRGBA> {
        (**self).render_snapshot(width, height)
    }
}

/// Surface that always returns the same frame.
#[derive(Clone, Debug)]
pub struct StaticSurface {
    frame: FrameRGBA,
}

impl StaticSurface {
    /// Wrap a prepared frame.
    pub fn new(frame: FrameRGBA) -> Self {
        Self { frame }
    }

    /// Opaque single-color surface.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut frame = FrameRGBA::transparent(width, height);
        frame.premultiplied = false;
        for px in frame.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self { frame }
    }
}

impl DisplaySurface for StaticSurface {
    fn render_snapshot(&mut self, width: u32, height: u32) -> GardenResult<FrameRGBA> {
        if width != self.frame.width || height != self.frame.height {
            return Err(crate::foundation::error::GardenError::validation(format!(
                "static surface is {}x{}, requested {}x{}",
                self.frame.width, self.frame.height, width, height
            )));
        }
        Ok(self.frame.clone())
    }
}
