/// Moore-Neighbor boundary tracing.
pub mod contour;
/// Decode -> grayscale -> edges -> (contour) -> sample orchestration.
pub mod pipeline;
/// Closed polygons and point-in-polygon tests.
pub mod polygon;
/// Direct and rejection point samplers.
pub mod sample;
