use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::color::{Rgba, resolve_color};
use crate::core::processing::collage::{CollageOptions, validate_margin};
use crate::core::processing::resize::Rate;
use crate::error::{Error, Result};
use crate::types::ResampleAlg;

/// Collage parameters suitable for JSON presets and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageParams {
    /// Color name or hex string, see `resolve_color`
    pub background: String,
    /// Whitespace multiplier applied to each cell dimension; must be > 0
    pub margin: f64,
    pub algorithm: ResampleAlg,
    pub parallel: bool,
    /// Write a JSON layout description next to the image (`.json` extension)
    pub sidecar: bool,
}

impl Default for CollageParams {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            margin: 1.1,
            algorithm: ResampleAlg::Area,
            parallel: false,
            sidecar: false,
        }
    }
}

impl CollageParams {
    /// Resolves the background and validates the margin.
    pub fn to_options(&self) -> Result<CollageOptions> {
        validate_margin(self.margin)?;
        Ok(CollageOptions {
            background: resolve_color(&self.background)?,
            margin: self.margin,
            algorithm: self.algorithm,
            parallel: self.parallel,
        })
    }
}

/// Single-image resize parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub rate: f64,
    pub algorithm: ResampleAlg,
    pub background: String,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            algorithm: ResampleAlg::Area,
            background: "transparent".to_string(),
        }
    }
}

impl ResizeParams {
    pub fn validated(&self) -> Result<(Rate, Rgba)> {
        Ok((Rate::new(self.rate)?, resolve_color(&self.background)?))
    }
}

/// Reads a JSON preset into any of the parameter structs.
pub fn load_params<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| Error::InvalidArgument {
        arg: "config",
        value: format!("{}: {}", path.display(), e),
    })
}
