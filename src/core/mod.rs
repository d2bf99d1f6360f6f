//! Core building blocks: the RGBA canvas, resamplers, collage layout and
//! compositing, plus the small value types they are parameterized by
//! (colors, aspect ratios, parameter presets). Consumed by the high-level
//! `api` module.
pub mod aspect;
pub mod color;
pub mod params;
pub mod processing;
