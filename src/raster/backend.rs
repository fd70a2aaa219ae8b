//! Rasterizer trait and shared parameter types.
//!
//! [`RasterParams`] describes *what* to produce, not *how*: source
//! path, output path, and an optional target box. `size: None` means
//! "native size" — the source is rasterized at the fixed decode
//! density without any resize. This separation lets the orchestrator
//! be exercised in tests with a mock that records operations instead
//! of rendering pixels.

use crate::registry::SizeSpec;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// One unit of conversion work: source × output × optional target box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// `None` converts at native (density-scaled) size.
    pub size: Option<SizeSpec>,
}

/// A vector-to-raster conversion backend.
pub trait Rasterizer {
    /// Convert one source into one raster file.
    fn rasterize(&self, params: &RasterParams) -> Result<(), RasterError>;
}
