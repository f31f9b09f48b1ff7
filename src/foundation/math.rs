pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Luminance weights used by the grayscale stage.
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let l = 0.3 * f64::from(r) + 0.59 * f64::from(g) + 0.11 * f64::from(b);
    l.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

/// Convert premultiplied RGBA8 into straight alpha, writing into `dst`.
pub(crate) fn unpremultiply_rgba8(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u32::from(s[3]);
        if a == 0 {
            d.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        for i in 0..3 {
            d[i] = ((u32::from(s[i]) * 255 + a / 2) / a).min(255) as u8;
        }
        d[3] = s[3];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
