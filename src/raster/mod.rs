//! Vector-to-raster conversion.
//!
//! The rest of the crate only talks to the [`Rasterizer`] trait: one
//! operation turning an SVG source into a PNG at an optional target
//! box. The production implementation is [`SvgRasterizer`] — pure
//! Rust, built on `resvg`/`usvg`/`tiny-skia` for rendering and the
//! `image` crate for resampling and PNG encoding.
//!
//! Split into:
//! - **Backend**: the [`Rasterizer`] trait and [`RasterParams`]
//! - **Svg**: the resvg-based implementation

pub mod backend;
pub mod svg;

pub use backend::{RasterError, RasterParams, Rasterizer};
pub use svg::SvgRasterizer;
