use std::path::Path;

use image::{ExtendedColorType, ImageFormat};

use crate::core::processing::canvas::{Canvas, PixelSource};
use crate::error::{Error, Result};

pub fn write_rgba_png(output: &Path, canvas: &Canvas) -> Result<()> {
    let (width, height) = canvas.dimensions();
    image::save_buffer_with_format(
        output,
        canvas.as_raw(),
        width,
        height,
        ExtendedColorType::Rgba8,
        ImageFormat::Png,
    )
    .map_err(Error::encode)
}
