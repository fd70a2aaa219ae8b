//! Pure Rust SVG rasterizer — no external binaries.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Parse SVG | `usvg::Tree::from_data` |
//! | Render | `resvg::render` into a `tiny_skia::Pixmap` |
//! | Resize | `image::imageops::resize` with `Lanczos3` |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, max compression |
//!
//! The source is always rendered at a fixed 300 DPI-equivalent
//! density (scale 300/72 over the SVG's nominal size) before any
//! resize, so small targets are downsampled from a well-sampled
//! raster instead of being rendered blurry from an undersized one.
//! Targets use "contain" fit: scale to fit inside the box preserving
//! aspect ratio, pad the remainder with transparency.

use super::backend::{RasterError, RasterParams, Rasterizer};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::path::Path;

/// Decode density relative to the SVG's nominal 72 DPI size.
const DENSITY_SCALE: f32 = 300.0 / 72.0;

/// Rasterizer backed by resvg + the `image` crate.
pub struct SvgRasterizer;

impl SvgRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, params: &RasterParams) -> Result<(), RasterError> {
        let rendered = render_svg(&params.source)?;
        let final_img = match params.size {
            Some(size) => contain_fit(&rendered, size.width(), size.height()),
            None => rendered,
        };
        write_png(&final_img, &params.output)
    }
}

/// Parse and render an SVG file at the fixed decode density.
fn render_svg(source: &Path) -> Result<RgbaImage, RasterError> {
    let data = std::fs::read(source)?;
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &options).map_err(|e| {
        RasterError::ProcessingFailed(format!("Failed to parse {}: {}", source.display(), e))
    })?;

    let size = tree.size();
    let width = (size.width() * DENSITY_SCALE).ceil() as u32;
    let height = (size.height() * DENSITY_SCALE).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        RasterError::ProcessingFailed(format!(
            "Cannot allocate {}x{} canvas for {}",
            width,
            height,
            source.display()
        ))
    })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(DENSITY_SCALE, DENSITY_SCALE),
        &mut pixmap.as_mut(),
    );

    pixmap_to_rgba(&pixmap).ok_or_else(|| {
        RasterError::ProcessingFailed(format!("Render produced no pixels for {}", source.display()))
    })
}

/// Convert a premultiplied tiny-skia pixmap to straight-alpha RGBA.
fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> Option<RgbaImage> {
    let mut data = Vec::with_capacity((pixmap.width() * pixmap.height() * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
}

/// Scale `img` to fit inside `target_w` × `target_h` preserving aspect
/// ratio, centered on a transparent canvas of exactly that size.
fn contain_fit(img: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = (img.width(), img.height());
    let scale = f64::min(target_w as f64 / w as f64, target_h as f64 / h as f64);
    let fit_w = ((w as f64 * scale).round() as u32).clamp(1, target_w);
    let fit_h = ((h as f64 * scale).round() as u32).clamp(1, target_h);

    let resized = imageops::resize(img, fit_w, fit_h, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(target_w, target_h, Rgba([0, 0, 0, 0]));
    let x = ((target_w - fit_w) / 2) as i64;
    let y = ((target_h - fit_h) / 2) as i64;
    imageops::overlay(&mut canvas, &resized, x, y);
    canvas
}

/// Encode as lossless PNG at maximum compression effort.
fn write_png(img: &RgbaImage, output: &Path) -> Result<(), RasterError> {
    let file = std::fs::File::create(output)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| {
            RasterError::ProcessingFailed(format!("PNG encode failed for {}: {}", output.display(), e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SizeSpec;
    use tempfile::TempDir;

    const RED_RECT_100X50: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="red"/></svg>"#;

    fn write_source(dir: &Path, name: &str, svg: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, svg).unwrap();
        path
    }

    #[test]
    fn square_target_produces_exact_box() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "logo.svg", RED_RECT_100X50);
        let output = tmp.path().join("logo.png");

        SvgRasterizer::new()
            .rasterize(&RasterParams {
                source,
                output: output.clone(),
                size: Some(SizeSpec::Square(64)),
            })
            .unwrap();

        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!((w, h), (64, 64));
    }

    #[test]
    fn contain_fit_pads_with_transparency() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "logo.svg", RED_RECT_100X50);
        let output = tmp.path().join("logo.png");

        SvgRasterizer::new()
            .rasterize(&RasterParams {
                source,
                output: output.clone(),
                size: Some(SizeSpec::Square(64)),
            })
            .unwrap();

        // 100x50 content fits as 64x32, centered vertically: the top
        // rows are padding, the middle is the opaque red rect.
        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(63, 63)[3], 0);
        let center = img.get_pixel(32, 32);
        assert_eq!(center[3], 255);
        assert!(center[0] > 200);
    }

    #[test]
    fn rect_target_respects_both_dimensions() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "og-image.svg", RED_RECT_100X50);
        let output = tmp.path().join("og-image.png");

        SvgRasterizer::new()
            .rasterize(&RasterParams {
                source,
                output: output.clone(),
                size: Some(SizeSpec::Rect {
                    width: 1200,
                    height: 630,
                }),
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (1200, 630));
    }

    #[test]
    fn native_size_uses_decode_density() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "art.svg", RED_RECT_100X50);
        let output = tmp.path().join("art.png");

        SvgRasterizer::new()
            .rasterize(&RasterParams {
                source,
                output: output.clone(),
                size: None,
            })
            .unwrap();

        // 100x50 nominal at 300/72 density: ceil(416.67) x ceil(208.33)
        assert_eq!(image::image_dimensions(&output).unwrap(), (417, 209));
    }

    #[test]
    fn corrupt_source_errors() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "broken.svg", "this is not svg at all <<<");
        let output = tmp.path().join("broken.png");

        let result = SvgRasterizer::new().rasterize(&RasterParams {
            source,
            output: output.clone(),
            size: Some(SizeSpec::Square(16)),
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn missing_source_errors() {
        let tmp = TempDir::new().unwrap();
        let result = SvgRasterizer::new().rasterize(&RasterParams {
            source: tmp.path().join("absent.svg"),
            output: tmp.path().join("absent.png"),
            size: None,
        });
        assert!(matches!(result, Err(RasterError::Io(_))));
    }

    #[test]
    fn existing_output_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(tmp.path(), "logo.svg", RED_RECT_100X50);
        let output = tmp.path().join("logo.png");
        std::fs::write(&output, "stale bytes").unwrap();

        SvgRasterizer::new()
            .rasterize(&RasterParams {
                source,
                output: output.clone(),
                size: Some(SizeSpec::Square(16)),
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (16, 16));
    }

    #[test]
    fn contain_fit_upscales_small_content() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255]));
        let fitted = contain_fit(&img, 40, 20);
        assert_eq!((fitted.width(), fitted.height()), (40, 20));
        // Square content in a wide box: 20x20 centered, sides padded.
        assert_eq!(fitted.get_pixel(0, 10)[3], 0);
        assert_eq!(fitted.get_pixel(20, 10)[3], 255);
    }
}
