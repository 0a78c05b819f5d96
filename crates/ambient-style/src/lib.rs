#![forbid(unsafe_code)]

//! Color utilities and sub-theme configuration.
//!
//! Sub-themes are immutable static records: a semantic HSL palette, a
//! renderer identifier, and numeric tuning knobs. Nothing here is parsed
//! from files or mutated after process start. Lookups never fail; unknown
//! ids resolve to the default sub-theme.

pub mod color;
pub mod theme;

pub use color::{HslTriplet, hsl_to_rgb, parse_triplet};
pub use theme::{EffectTuning, SubTheme, sub_theme, sub_theme_count};
