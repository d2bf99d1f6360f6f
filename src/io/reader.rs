use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::info;

use crate::error::{Error, Result};

/// Decodes a PNG or JPEG, guessing the format from content and falling back
/// to the extension.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let img = reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Decoded {:?}: {}x{}", path, img.width(), img.height());
    Ok(img)
}

/// Decodes every path in order; the first failure aborts.
pub fn decode_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DynamicImage>> {
    paths.iter().map(|p| decode_image(p.as_ref())).collect()
}
