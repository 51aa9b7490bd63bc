//! glyphcast library crate.
//!
//! Converts RGBA pixel buffers, still or animated, into monospace glyph art:
//! literal character palettes or 2x4 braille dot patterns, with optional
//! per-glyph color rendered to an off-screen raster.
//!
//! - [`ascii`] is the per-frame conversion engine.
//! - [`pipeline`] runs it across frame sequences with supersession, progress
//!   reporting and a bounded result cache.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod patterns;
pub mod pipeline;
