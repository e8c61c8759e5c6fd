//! Foundation types for the sound change toolchain.
//!
//! This module provides the primitives used throughout the engine:
//! - [`FormatterMode`] - Unicode normalisation and segmentation strategy
//! - Domain constants (wildcard and masking feature values, reserved tokens)
//! - [`TextRange`], [`TextSize`] - byte offsets used by parse diagnostics
//!
//! This module has NO dependencies on other soundchange modules.

pub mod constants;
mod formatter;

pub use formatter::{FormatterMode, SegmentationMode};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
