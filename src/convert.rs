//! The conversion run: scan → convert → derive missing outputs.
//!
//! A run is strictly sequential and single pass:
//!
//! 1. Validate the root directory (missing root is the only fatal
//!    error).
//! 2. Scan for SVG sources ([`crate::scan`]).
//! 3. Convert each discovered source per its registry plan, or at
//!    native size for unrecognized names. A failure converting one
//!    source is reported on stderr and the run moves on to the next
//!    file; remaining sizes of the failed file are abandoned.
//! 4. Plan fallback candidates from the *original* discovered set —
//!    outputs produced in step 3 never satisfy or suppress a
//!    candidate.
//! 5. Generate each candidate, with the same per-candidate isolation.
//!
//! [`convert`] is the public entry point and returns the discovered
//! source paths. [`convert_with_rasterizer`] takes an injected
//! [`Rasterizer`] and returns the full [`RunReport`]; tests use it
//! with a mock backend, the CLI uses it for `--report` and `--strict`.

use crate::output;
use crate::raster::{RasterParams, Rasterizer, SvgRasterizer};
use crate::registry::{self, ImagePlan, SizeSpec};
use crate::scan::{self, OUTPUT_EXTENSION, SOURCE_EXTENSION, ScanDepth, ScanError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Registry is inconsistent: {0}")]
    Registry(#[from] registry::RegistryError),
}

/// Options accepted by [`convert`].
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub depth: ScanDepth,
    pub verbose: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            depth: ScanDepth::Unlimited,
            verbose: false,
        }
    }
}

/// One produced raster file.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub source: PathBuf,
    pub output: PathBuf,
    /// `None` for native-size conversions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeSpec>,
    pub from_fallback: bool,
}

/// One isolated, non-fatal conversion failure.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub source: PathBuf,
    pub message: String,
}

/// Everything a run did: discovered sources, produced outputs,
/// isolated failures. Serializable for the CLI's `--report`.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub sources: Vec<PathBuf>,
    pub outputs: Vec<OutputRecord>,
    pub failures: Vec<FailureRecord>,
}

/// A known output that is absent as its own source but derivable from
/// a fallback's source file.
#[derive(Debug)]
pub struct FallbackCandidate {
    pub name: &'static str,
    pub plan: &'static ImagePlan,
    /// Resolved path of the fallback's source in the root directory.
    pub source: PathBuf,
}

/// Convert every SVG under `directory`, then derive missing known
/// outputs from fallbacks. Returns the discovered source paths.
///
/// Fails only when the directory does not exist; per-file conversion
/// errors are reported on stderr and never surface here — even a run
/// in which every single conversion failed returns `Ok`.
pub fn convert(directory: &Path, options: &ConvertOptions) -> Result<Vec<PathBuf>, ConvertError> {
    convert_with_rasterizer(directory, options, &SvgRasterizer::new()).map(|report| report.sources)
}

/// [`convert`] with an injected rasterizer, returning the full report.
pub fn convert_with_rasterizer(
    directory: &Path,
    options: &ConvertOptions,
    rasterizer: &impl Rasterizer,
) -> Result<RunReport, ConvertError> {
    registry::validate()?;

    let root = std::path::absolute(directory).unwrap_or_else(|_| directory.to_path_buf());
    let sources = scan::find_svg_sources(&root, options.depth)?;

    let mut report = RunReport {
        sources: sources.clone(),
        ..RunReport::default()
    };

    if sources.is_empty() {
        if options.verbose {
            output::print_line(&output::format_no_sources(&root));
        }
        return Ok(report);
    }

    if options.verbose {
        output::print_line(&output::format_found(sources.len()));
    }

    for source in &sources {
        convert_source(rasterizer, source, options.verbose, &mut report);
    }

    let candidates = find_missing_known_images(&root, &sources);
    if options.verbose && !candidates.is_empty() {
        output::print_line(&output::format_fallback_count(candidates.len()));
    }
    for candidate in &candidates {
        generate_from_fallback(rasterizer, &root, candidate, options.verbose, &mut report);
    }

    Ok(report)
}

/// Convert one discovered source. Errors are absorbed into the report.
fn convert_source(
    rasterizer: &impl Rasterizer,
    source: &Path,
    verbose: bool,
    report: &mut RunReport,
) {
    let base = scan::base_name(source);
    let dir = source.parent().unwrap_or_else(|| Path::new(""));

    match registry::resolve_plan(&base) {
        Some(plan) => {
            for size in plan.sizes {
                let output = dir.join(format!(
                    "{}{}.{}",
                    base,
                    plan.suffix.apply(*size),
                    OUTPUT_EXTENSION
                ));
                if !emit(rasterizer, source, &output, Some(*size), false, report) {
                    output_source_error(source, report);
                    return;
                }
                if verbose {
                    output::print_line(&output::format_created(&output, Some(*size)));
                }
            }
        }
        None => {
            // Unrecognized name: single output at native size.
            let output = dir.join(format!("{}.{}", base, OUTPUT_EXTENSION));
            if !emit(rasterizer, source, &output, None, false, report) {
                output_source_error(source, report);
                return;
            }
            if verbose {
                output::print_line(&output::format_created(&output, None));
            }
        }
    }
}

/// Determine which known outputs are absent and have a satisfiable
/// fallback. `discovered` is the scan result; the check is against
/// the entry's own canonical name, not against produced outputs.
pub fn find_missing_known_images(root: &Path, discovered: &[PathBuf]) -> Vec<FallbackCandidate> {
    let discovered_names: Vec<String> = discovered
        .iter()
        .map(|p| scan::base_name(p).to_lowercase())
        .collect();

    let mut candidates = Vec::new();
    for &(name, ref plan) in registry::KNOWN_IMAGES {
        let Some(fallback) = plan.fallback else {
            continue;
        };
        if discovered_names.contains(&name.to_lowercase()) {
            continue;
        }

        // Fallback source lookup is deliberately non-recursive and
        // ignores the scan depth bound: only {root}/{fallback}.svg
        // counts, wherever the scan may have looked.
        let source = root.join(format!("{}.{}", fallback, SOURCE_EXTENSION));
        if source.is_file() {
            candidates.push(FallbackCandidate { name, plan, source });
        }
    }
    candidates
}

/// Generate one fallback candidate into the root directory.
fn generate_from_fallback(
    rasterizer: &impl Rasterizer,
    root: &Path,
    candidate: &FallbackCandidate,
    verbose: bool,
    report: &mut RunReport,
) {
    for size in candidate.plan.sizes {
        let output = root.join(format!(
            "{}{}.{}",
            candidate.name,
            candidate.plan.suffix.apply(*size),
            OUTPUT_EXTENSION
        ));
        if !emit(rasterizer, &candidate.source, &output, Some(*size), true, report) {
            if let Some(failure) = report.failures.last() {
                output::eprint_line(&output::format_fallback_error(
                    candidate.name,
                    &failure.message,
                ));
            }
            return;
        }
        if verbose {
            output::print_line(&output::format_created_from_fallback(
                &output,
                *size,
                &candidate.source,
            ));
        }
    }
}

/// Rasterize one output, recording either the output or the failure.
/// Returns whether it succeeded.
fn emit(
    rasterizer: &impl Rasterizer,
    source: &Path,
    output: &Path,
    size: Option<SizeSpec>,
    from_fallback: bool,
    report: &mut RunReport,
) -> bool {
    let params = RasterParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        size,
    };
    match rasterizer.rasterize(&params) {
        Ok(()) => {
            report.outputs.push(OutputRecord {
                source: source.to_path_buf(),
                output: output.to_path_buf(),
                size,
                from_fallback,
            });
            true
        }
        Err(e) => {
            report.failures.push(FailureRecord {
                source: source.to_path_buf(),
                message: e.to_string(),
            });
            false
        }
    }
}

fn output_source_error(source: &Path, report: &RunReport) {
    if let Some(failure) = report.failures.last() {
        output::eprint_line(&output::format_source_error(source, &failure.message));
    }
}
