//! High-level, ergonomic library API: collage and resize from paths to
//! in-memory canvases or files, a directory batch helper, and blank canvases.
//! Prefer these entrypoints over the low-level `core::processing` modules.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::core::aspect::Aspect;
use crate::core::color::resolve_color;
use crate::core::params::{CollageParams, ResizeParams};
use crate::core::processing::canvas::{Canvas, PixelSource};
use crate::core::processing::collage::{Collage, compose_collage};
use crate::core::processing::resize::Rate;
use crate::error::{Error, Result};
use crate::io::reader::{decode_all, decode_image};
use crate::io::writers::save_canvas;
use crate::io::writers::sidecar::{CollageSidecar, write_collage_sidecar};
use crate::types::OutputFormat;

/// Builds a collage from image files with area-average resampling.
pub fn collage<P: AsRef<Path>>(paths: &[P], background: &str, margin: f64) -> Result<Canvas> {
    let params = CollageParams {
        background: background.to_string(),
        margin,
        ..CollageParams::default()
    };
    Ok(collage_with_params(paths, &params)?.canvas)
}

/// Like [`collage`], returning layout details alongside the canvas.
pub fn collage_with_params<P: AsRef<Path>>(paths: &[P], params: &CollageParams) -> Result<Collage> {
    if paths.is_empty() {
        return Err(Error::EmptyInput);
    }
    let options = params.to_options()?;
    let images = decode_all(paths)?;
    compose_collage(&images, &options)
}

/// Builds a collage and writes it to `output` (`.png`, `.jpg`, `.jpeg`),
/// plus a JSON layout sidecar when `params.sidecar` is set.
pub fn collage_to_path<P: AsRef<Path>>(
    paths: &[P],
    output: &Path,
    params: &CollageParams,
) -> Result<Collage> {
    ensure_supported_output(output)?;
    let collage = collage_with_params(paths, params)?;
    save_canvas(&collage.canvas, output)?;
    if params.sidecar {
        let sidecar = CollageSidecar::new(&collage, paths, output, &params.background);
        write_collage_sidecar(output, &sidecar)?;
    }
    Ok(collage)
}

/// Resizes any pixel source according to `params`.
pub fn resize_with_params<S: PixelSource + ?Sized>(src: &S, params: &ResizeParams) -> Result<Canvas> {
    let (rate, bg) = params.validated()?;
    params.algorithm.resample(src, rate, bg)
}

/// Decodes `input`, resizes it and writes the result; returns the output size.
pub fn resize_path_to_path(input: &Path, output: &Path, params: &ResizeParams) -> Result<(u32, u32)> {
    ensure_supported_output(output)?;
    let (rate, bg) = params.validated()?;
    let img = decode_image(input)?;
    let resized = params.algorithm.resample(&img, rate, bg)?;
    save_canvas(&resized, output)?;
    info!(
        "Resized {:?} -> {:?} ({}x{})",
        input,
        output,
        resized.width(),
        resized.height()
    );
    Ok(resized.dimensions())
}

/// Canvas of `aspect` scaled by `rate`, filled with the named color.
pub fn blank_canvas(aspect: Aspect, rate: f64, color: &str) -> Result<Canvas> {
    let rate = Rate::new(rate)?;
    let (w, h) = aspect.to_size(rate.get());
    Ok(Canvas::filled(w, h, resolve_color(color)?))
}

/// Summary of a directory batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Resizes every PNG/JPEG file directly inside `input_dir` into `output_dir`.
///
/// With `continue_on_error` a failing file is counted and logged; otherwise
/// the first failure is returned. Outputs are named `<stem>.<ext>`; when two
/// inputs share a stem, the later one keeps its source extension
/// (`a.png` -> `a.png.png`) so nothing is overwritten.
pub fn resize_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ResizeParams,
    format: OutputFormat,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validated()?;
    fs::create_dir_all(output_dir)?;

    let mut entries: Vec<_> = fs::read_dir(input_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    let mut report = BatchReport::default();
    let mut written = HashSet::new();
    for path in entries {
        if !path.is_file() || OutputFormat::from_path(&path).is_none() {
            info!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
            continue;
        }
        let Some(stem) = path.file_stem() else {
            report.skipped += 1;
            continue;
        };
        let mut output_name = format!("{}.{}", stem.to_string_lossy(), format.extension());
        if !written.insert(output_name.clone()) {
            // `a.png` and `a.jpg` share a stem; keep the source extension instead
            let fallback = format!(
                "{}.{}",
                path.file_name().unwrap_or(stem).to_string_lossy(),
                format.extension()
            );
            warn!(
                "{:?} would overwrite {}; writing {} instead",
                path, output_name, fallback
            );
            if !written.insert(fallback.clone()) {
                warn!("Skipping {:?}: output name {} already used", path, fallback);
                report.skipped += 1;
                continue;
            }
            output_name = fallback;
        }
        let output_path = output_dir.join(output_name);

        match resize_path_to_path(&path, &output_path, params) {
            Ok(_) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

fn ensure_supported_output(output: &Path) -> Result<()> {
    OutputFormat::from_path(output)
        .map(|_| ())
        .ok_or_else(|| Error::UnsupportedFormat {
            path: output.to_path_buf(),
        })
}

