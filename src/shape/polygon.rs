use crate::foundation::core::{Point, Rect};

/// Ordered, implicitly closed polygon in normalized coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Wrap an ordered vertex list.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Vertices in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the polygon, returning its vertices.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no boundary was found.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        let init = Rect::from_points(first, first);
        Some(
            self.points
                .iter()
                .skip(1)
                .fold(init, |r, p| r.union_pt(*p)),
        )
    }

    /// Ray-casting containment test.
    ///
    /// Counts crossings of a horizontal ray from `p` towards +x with every edge (including the
    /// closing edge); an odd count means inside.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/polygon.rs"]
mod tests;
