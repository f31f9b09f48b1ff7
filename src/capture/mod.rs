//! Fixed-rate sampling of a changing surface into one encoded artifact.
//!
//! A [`session::CaptureSession`] owns the accumulation surface and the encoder for one
//! recording; [`recorder::Recorder`] enforces the single-session rule and paces ticks against a
//! [`clock::Clock`].

/// Injectable time sources.
pub mod clock;
/// Single-slot recorder and lifecycle observers.
pub mod recorder;
/// The capture state machine and its artifact.
pub mod session;
/// The snapshot contract.
pub mod surface;
