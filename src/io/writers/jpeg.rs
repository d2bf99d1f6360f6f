use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::processing::canvas::{Canvas, PixelSource};
use crate::error::{Error, Result};

/// Baseline JPEG at quality 100. Alpha is discarded.
pub fn write_rgba_jpeg(output: &Path, canvas: &Canvas) -> Result<()> {
    let (width, height) = canvas.dimensions();
    let too_large = || Error::Encode(format!("{}x{} exceeds the JPEG size limit", width, height));
    let cols = u16::try_from(width).map_err(|_| too_large())?;
    let rows = u16::try_from(height).map_err(|_| too_large())?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder
        .encode(canvas.as_raw(), cols, rows, ColorType::Rgba)
        .map_err(Error::encode)?;
    writer.flush()?;
    Ok(())
}
