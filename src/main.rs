use clap::Parser;
use convert_svgs::raster::SvgRasterizer;
use convert_svgs::scan::ScanDepth;
use convert_svgs::{ConvertOptions, convert_with_rasterizer};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "convert-svgs")]
#[command(about = "Convert SVG files to PNG with automatic sizing")]
#[command(long_about = "\
Convert SVG files to PNG with automatic sizing

Scans a directory for SVG files and converts each to PNG. Well-known
base names produce every size variant a site needs:

  favicon.svg            -> 16, 32, 48, 64, 128, 256 (suffixed -NxN)
  favicon-16x16.svg      -> 16x16 PNG
  favicon-32x32.svg      -> 32x32 PNG
  apple-touch-icon.svg   -> 180x180 PNG
  og-image.svg           -> 1200x630 PNG
  twitter-image.svg      -> 1200x600 PNG
  android-chrome-*.svg   -> respective sizes

Other SVG files are converted to PNG at original size. Missing
well-known icons are derived from favicon.svg when it exists in the
target directory.")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Target directory to scan
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Maximum directory depth to scan (-1 for unlimited)
    #[arg(long, default_value_t = -1, value_parser = clap::value_parser!(i32).range(-1..))]
    depth: i32,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,

    /// Exit non-zero if any individual conversion failed
    #[arg(long)]
    strict: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = ConvertOptions {
        depth: ScanDepth::from_cli(cli.depth),
        verbose: cli.verbose,
    };

    let report = match convert_with_rasterizer(&cli.directory, &options, &SvgRasterizer::new()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(report_path) = &cli.report {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(e) = std::fs::write(report_path, json) {
                    eprintln!("Error writing report {}: {}", report_path.display(), e);
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if cli.verbose && !report.sources.is_empty() {
        println!("Conversion complete!");
    }

    // Isolated failures do not fail the run unless asked to.
    if cli.strict && !report.failures.is_empty() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
