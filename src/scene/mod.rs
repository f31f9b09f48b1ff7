//! The word garden: tokens that fly from offscreen onto extracted shape points.

/// Color modes and palettes.
pub mod color;
/// Easing curves.
pub mod ease;
/// CPU rasterization of the scene.
pub mod garden;
/// Token layout and motion.
pub mod token;
