#![forbid(unsafe_code)]

//! Pixel kernel for the ambient theme engine.
//!
//! Two building blocks live here:
//! - [`PackedRgba`]: a straight-alpha RGBA color packed into a `u32`.
//! - [`Surface`]: a row-major pixel buffer with bounds-safe, blend-aware
//!   drawing primitives (the only way effects touch pixels).
//!
//! Everything in this crate is infallible: out-of-bounds writes are dropped,
//! zero-sized surfaces accept any call and draw nothing.

pub mod pixel;
pub mod surface;

pub use pixel::{BlendMode, PackedRgba};
pub use surface::Surface;
