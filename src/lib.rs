//! # convert-svgs
//!
//! Convert SVG sources to PNG website icons with automatic sizing.
//! Point it at a directory and every SVG becomes a PNG; files with
//! well-known names (`favicon.svg`, `og-image.svg`,
//! `apple-touch-icon.svg`, ...) automatically produce every size
//! variant a site needs, and missing well-known icons are derived
//! from `favicon.svg` when present.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan       directory  →  SVG source list     (depth-bounded walk)
//! 2. Convert    each source →  PNG outputs        (per-file isolation)
//! 3. Fallbacks  registry gaps →  derived outputs  (from favicon.svg)
//! ```
//!
//! A run is a single sequential pass. The only fatal condition is a
//! missing target directory; every per-file failure is reported on
//! stderr and the run continues, so one corrupt SVG never blocks the
//! rest of a site's icons.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | The known-image table: canonical names, sizes, suffix rules, fallbacks |
//! | [`scan`] | Depth-bounded directory walk collecting SVG sources |
//! | [`convert`] | The run itself: per-source conversion, fallback planning, the [`convert::RunReport`] |
//! | [`raster`] | The [`raster::Rasterizer`] trait and the resvg-based PNG backend |
//! | [`output`] | CLI output formatting — pure `format_*` functions, thin print wrappers |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Rasterization (No librsvg, No ImageMagick)
//!
//! SVG rendering uses `resvg`/`usvg`/`tiny-skia` and encoding uses the
//! `image` crate — all pure Rust, statically linked. No system
//! packages, no version drift: download one binary and it works.
//!
//! ## Plans as Const Data
//!
//! The registry is a `const` table; suffix rules are a small tagged
//! enum dispatched by a pure function rather than closures embedded in
//! configuration. The table is validated once per run (fallback
//! references resolve, no cycles) so future edits fail loudly.
//!
//! ## Fixed Decode Density
//!
//! Sources are always rendered at a 300 DPI-equivalent density before
//! any resize. A 16x16 favicon downsampled from a well-sampled raster
//! is crisp; one rendered directly from an undersized raster is not.

pub mod convert;
pub mod output;
pub mod raster;
pub mod registry;
pub mod scan;

pub use convert::{ConvertError, ConvertOptions, RunReport, convert, convert_with_rasterizer};
pub use registry::{ImagePlan, SizeSpec, SuffixRule};
pub use scan::ScanDepth;
