/// Owned RGBA8 raster shared by every pipeline stage.
pub mod buffer;
/// Binary shape masks (threshold or gradient edge detection).
pub mod edge;
/// Luminance conversion.
pub mod gray;
