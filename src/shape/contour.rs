use std::collections::HashSet;

use crate::foundation::core::normalize_px;
use crate::raster::edge::BinaryMask;
use crate::shape::polygon::Polygon;

/// Compass offsets in clockwise order: N, NE, E, SE, S, SW, W, NW (y grows downwards).
const DIRS: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const WEST: usize = 6;

fn dir_index(dx: i64, dy: i64) -> Option<usize> {
    DIRS.iter().position(|&d| d == (dx, dy))
}

/// Trace the outer boundary of the first shape found in row-major order.
///
/// Returns an empty polygon when the mask has no shape pixels. Each boundary pixel appears at
/// most once. The walk stops when it re-enters the start pixel, when the start pixel is isolated,
/// or after `8 * width * height` steps.
#[tracing::instrument(skip(mask), fields(w = mask.width(), h = mask.height()))]
pub fn trace_contour(mask: &BinaryMask) -> Polygon {
    let Some(start) = find_start(mask) else {
        tracing::debug!("no shape pixel, empty contour");
        return Polygon::default();
    };

    let (w, h) = (mask.width(), mask.height());
    let max_steps = 8usize
        .saturating_mul(w as usize)
        .saturating_mul(h as usize);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut record = |p: (i64, i64)| {
        if seen.insert(p) {
            out.push(normalize_px(p.0 as f64, p.1 as f64, w, h));
        }
    };
    record(start);

    // The start pixel is the first in row-major order, so its west neighbour is background.
    let mut cur = start;
    let mut backtrack = WEST;
    for _ in 0..max_steps {
        let Some((next, next_backtrack)) = step(mask, cur, backtrack) else {
            break;
        };
        if next == start {
            break;
        }
        record(next);
        cur = next;
        backtrack = next_backtrack;
    }

    tracing::debug!(vertices = out.len(), "traced contour");
    Polygon::new(out)
}

fn find_start(mask: &BinaryMask) -> Option<(i64, i64)> {
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.is_shape(x, y) {
                return Some((i64::from(x), i64::from(y)));
            }
        }
    }
    None
}

/// One Moore step: sweep clockwise from the backtrack direction and return the first shape
/// neighbour plus the direction (seen from that neighbour) of the background pixel examined just
/// before it.
fn step(mask: &BinaryMask, cur: (i64, i64), backtrack: usize) -> Option<((i64, i64), usize)> {
    for k in 1..=8 {
        let d = (backtrack + k) % 8;
        let (dx, dy) = DIRS[d];
        let cand = (cur.0 + dx, cur.1 + dy);
        if !mask.is_shape_at(cand.0, cand.1) {
            continue;
        }
        let (px, py) = DIRS[(d + 7) % 8];
        let prev = (cur.0 + px, cur.1 + py);
        let back = dir_index(prev.0 - cand.0, prev.1 - cand.1).unwrap_or(WEST);
        return Some((cand, back));
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/shape/contour.rs"]
mod tests;
