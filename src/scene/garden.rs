use std::rc::Rc;
use std::time::Duration;

use vello_cpu::kurbo::Shape as _;

use crate::capture::clock::Clock;
use crate::capture::surface::DisplaySurface;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GardenError, GardenResult};
use crate::render::frame::FrameRGBA;
use crate::scene::ease::Ease;
use crate::scene::token::WordToken;

/// Settings for drawing a [`WordGarden`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GardenStyle {
    /// Canvas the tokens were laid out for.
    pub canvas: Canvas,
    /// Length of each token's travel.
    pub duration_secs: f64,
    /// Travel easing.
    pub ease: Ease,
    /// Straight-alpha stage color; `None` is transparent.
    pub background: Option<[u8; 4]>,
}

/// Animated word scene, rasterized on the CPU.
///
/// Animation time starts at the first snapshot, so a recorder can arm before the first frame.
pub struct WordGarden {
    tokens: Vec<WordToken>,
    style: GardenStyle,
    clock: Rc<dyn Clock>,
    origin: Option<Duration>,
}

impl WordGarden {
    /// Scene over laid-out `tokens`, timed by `clock`.
    pub fn new(tokens: Vec<WordToken>, style: GardenStyle, clock: Rc<dyn Clock>) -> Self {
        Self {
            tokens,
            style,
            clock,
            origin: None,
        }
    }

    /// Tokens in draw order.
    pub fn tokens(&self) -> &[WordToken] {
        &self.tokens
    }

    /// Rasterize the scene `t_secs` into the animation at `width x height`.
    ///
    /// Output is premultiplied. A size different from the layout canvas scales the scene.
    pub fn frame_at(&self, t_secs: f64, width: u32, height: u32) -> GardenResult<FrameRGBA> {
        let w16: u16 = width
            .try_into()
            .map_err(|_| GardenError::validation("snapshot width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| GardenError::validation("snapshot height exceeds u16"))?;
        if w16 == 0 || h16 == 0 {
            return Err(GardenError::validation("snapshot size must be non-zero"));
        }

        let sx = f64::from(width) / f64::from(self.style.canvas.width);
        let sy = f64::from(height) / f64::from(self.style.canvas.height);
        let view = vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy);

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        let mut ctx = vello_cpu::RenderContext::new(w16, h16);

        if let Some([r, g, b, a]) = self.style.background {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        for token in &self.tokens {
            let pose = token.pose(t_secs, self.style.duration_secs, self.style.ease);
            if pose.opacity <= 0.0 {
                continue;
            }
            let (cw, ch) = token.chip_size();
            let chip = vello_cpu::kurbo::RoundedRect::new(
                -cw / 2.0,
                -ch / 2.0,
                cw / 2.0,
                ch / 2.0,
                ch * 0.3,
            );
            let local = vello_cpu::kurbo::Affine::translate((pose.center.x, pose.center.y))
                * vello_cpu::kurbo::Affine::scale(pose.scale);

            let [r, g, b, a] = token.color;
            ctx.set_transform(view * local);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.push_opacity_layer(pose.opacity as f32);
            ctx.fill_path(&chip.to_path(0.1));
            ctx.pop_layer();
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl DisplaySurface for WordGarden {
    fn render_snapshot(&mut self, width: u32, height: u32) -> GardenResult<FrameRGBA> {
        let now = self.clock.now();
        let origin = *self.origin.get_or_insert(now);
        let t = now.saturating_sub(origin).as_secs_f64();
        self.frame_at(t, width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/garden.rs"]
mod tests;
