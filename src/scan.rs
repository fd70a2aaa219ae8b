//! Depth-bounded discovery of SVG source files.
//!
//! The scanner walks a directory tree and collects every file whose
//! extension is `svg` (case-insensitive). Traversal is depth-first in
//! whatever order the filesystem returns entries; callers must not
//! rely on a particular ordering, only on the set of results.
//!
//! Depth is counted from the root: files directly inside the root sit
//! at depth 0, files one directory down at depth 1, and so on.
//! [`ScanDepth::Unlimited`] disables the bound. A missing root is a
//! hard error — distinct from a root that exists but contains no
//! matching files, which yields an empty list.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extension of vector sources.
pub const SOURCE_EXTENSION: &str = "svg";

/// File extension of raster outputs.
pub const OUTPUT_EXTENSION: &str = "png";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Scan failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// How deep below the root the scan may descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    Unlimited,
    /// Maximum file depth, root = 0.
    Limited(u32),
}

impl ScanDepth {
    /// Map the CLI's `-1` sentinel onto [`ScanDepth::Unlimited`].
    /// The CLI rejects values below `-1` before this is reached.
    pub fn from_cli(depth: i32) -> Self {
        if depth < 0 {
            ScanDepth::Unlimited
        } else {
            ScanDepth::Limited(depth as u32)
        }
    }
}

/// Collect all SVG source files under `root`, bounded by `depth`.
pub fn find_svg_sources(root: &Path, depth: ScanDepth) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root);
    if let ScanDepth::Limited(max) = depth {
        // walkdir counts the root itself as depth 0 and its files as
        // depth 1, one more than our root-relative file depth.
        walker = walker.max_depth((max as usize).saturating_add(1));
    }

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_svg(entry.path()) {
            sources.push(entry.path().to_path_buf());
        }
    }
    Ok(sources)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Base name of a source file: the file name without its `.svg`
/// extension, original case preserved (`FAVICON.SVG` → `FAVICON`).
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
