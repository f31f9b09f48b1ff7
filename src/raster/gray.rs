use crate::foundation::math::luminance;
use crate::raster::buffer::PixelBuffer;

/// Replace every pixel with its luminance (`0.3R + 0.59G + 0.11B`), forcing alpha to 255.
pub fn grayscale(src: &PixelBuffer) -> PixelBuffer {
    let mut out = src.clone();
    grayscale_in_place(&mut out);
    out
}

/// In-place variant of [`grayscale`].
pub fn grayscale_in_place(buf: &mut PixelBuffer) {
    for px in buf.data_mut().chunks_exact_mut(4) {
        let l = luminance(px[0], px[1], px[2]);
        px[0] = l;
        px[1] = l;
        px[2] = l;
        px[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/gray.rs"]
mod tests;
