//! CLI output formatting.
//!
//! Format functions are pure — no I/O — so tests can assert on exact
//! lines; thin `print_*`/`eprint_*` wrappers do the writing. Progress
//! lines go to stdout only in verbose mode; isolated conversion
//! errors always go to stderr.

use crate::registry::SizeSpec;
use std::path::Path;

/// `Found 3 SVG file(s)`
pub fn format_found(count: usize) -> String {
    format!("Found {} SVG file(s)", count)
}

/// `No SVG files found in /some/dir`
pub fn format_no_sources(root: &Path) -> String {
    format!("No SVG files found in {}", root.display())
}

/// `Created: /dir/favicon-16x16.png (16x16)` — the size label is
/// omitted for native-size conversions.
pub fn format_created(output: &Path, size: Option<SizeSpec>) -> String {
    match size {
        Some(size) => format!("Created: {} ({})", output.display(), size),
        None => format!("Created: {}", output.display()),
    }
}

/// `Created: /dir/apple-touch-icon.png (180x180) [from favicon.svg]`
pub fn format_created_from_fallback(output: &Path, size: SizeSpec, source: &Path) -> String {
    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source.display().to_string());
    format!(
        "Created: {} ({}) [from {}]",
        output.display(),
        size,
        source_name
    )
}

/// `Generating 5 image(s) from fallbacks`
pub fn format_fallback_count(count: usize) -> String {
    format!("Generating {} image(s) from fallbacks", count)
}

/// `Error processing file /dir/broken.svg: <cause>`
pub fn format_source_error(source: &Path, cause: &str) -> String {
    format!("Error processing file {}: {}", source.display(), cause)
}

/// `Error generating apple-touch-icon from fallback: <cause>`
pub fn format_fallback_error(name: &str, cause: &str) -> String {
    format!("Error generating {} from fallback: {}", name, cause)
}

/// Write a progress line to stdout.
pub fn print_line(line: &str) {
    println!("{}", line);
}

/// Write an error line to stderr.
pub fn eprint_line(line: &str) {
    eprintln!("{}", line);
}
