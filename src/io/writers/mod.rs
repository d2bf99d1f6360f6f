//! Output writers. The encoder is picked from the file extension and an
//! unsupported extension fails before anything is written.
pub mod jpeg;
pub mod png;
pub mod sidecar;

use std::path::Path;

use tracing::info;

use crate::core::processing::canvas::Canvas;
use crate::error::{Error, Result};
use crate::types::OutputFormat;

pub fn save_canvas(canvas: &Canvas, output: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(output).ok_or_else(|| Error::UnsupportedFormat {
        path: output.to_path_buf(),
    })?;
    match format {
        OutputFormat::Png => png::write_rgba_png(output, canvas)?,
        OutputFormat::Jpeg => jpeg::write_rgba_jpeg(output, canvas)?,
    }
    info!("Saved {} to {:?}", format, output);
    Ok(format)
}
