#![forbid(unsafe_code)]

//! Ambient theme visual-effects engine.
//!
//! A pluggable, per-genre animated background renderer: ~45 independent
//! particle/atmosphere simulations driven over a persistent frame loop and
//! parameterized by a shared color palette.
//!
//! Design goals:
//! - **Deterministic**: effects seed their own xorshift RNG; identical input
//!   sequences produce identical pixels.
//! - **Never fatal**: a decorative background must not crash the page it
//!   decorates. Unknown ids fall back, bad colors parse to black, zero-sized
//!   surfaces render nothing.
//! - **Driver-agnostic effects**: after construction the driver never
//!   branches on which effect is active; everything flows through the
//!   [`SceneFx`] contract.
//!
//! # Layering
//!
//! ```text
//! color utils  ->  SceneFx contract  ->  effects  ->  registry  ->  driver
//!                                                                    ^
//!                                             sub-theme config ------'
//! ```

pub mod compose;
pub mod context;
pub mod contract;
pub mod driver;
pub mod ease;
pub mod effects;
pub mod quality;
pub mod registry;
pub mod rng;

pub use compose::{AmbientLayers, Overlay};
pub use context::{SceneContext, ThemeRgb};
pub use contract::SceneFx;
pub use driver::{AmbientCanvas, DriverState};
pub use quality::FxQuality;
pub use registry::FxRegistry;
