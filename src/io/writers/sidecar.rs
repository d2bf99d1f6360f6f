//! JSON sidecar describing how a collage was assembled.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::canvas::{PixelSource, Rect};
use crate::core::processing::collage::{AggregateStats, Collage, GridLayout};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidecarPlacement {
    pub source: String,
    pub source_size: (u32, u32),
    pub rate: f64,
    pub resized_size: (u32, u32),
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageSidecar {
    pub created: String,
    pub output: String,
    pub canvas_size: (u32, u32),
    pub background: String,
    pub stats: AggregateStats,
    pub layout: GridLayout,
    pub placements: Vec<SidecarPlacement>,
}

impl CollageSidecar {
    pub fn new<P: AsRef<Path>>(collage: &Collage, sources: &[P], output: &Path, background: &str) -> Self {
        let placements = collage
            .placements
            .iter()
            .map(|p| SidecarPlacement {
                source: sources
                    .get(p.index)
                    .map(|s| s.as_ref().display().to_string())
                    .unwrap_or_default(),
                source_size: p.source_size,
                rate: p.rate,
                resized_size: p.resized_size,
                rect: p.rect,
            })
            .collect();
        Self {
            created: chrono::Utc::now().to_rfc3339(),
            output: output.display().to_string(),
            canvas_size: collage.canvas.dimensions(),
            background: background.to_string(),
            stats: collage.stats,
            layout: collage.layout,
            placements,
        }
    }
}

pub fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}

pub fn write_collage_sidecar(output: &Path, sidecar: &CollageSidecar) -> Result<PathBuf> {
    let path = sidecar_path(output);
    let json_string = serde_json::to_string_pretty(sidecar).map_err(Error::encode)?;
    std::fs::write(&path, json_string)?;
    info!("Created collage layout sidecar: {:?}", path);
    Ok(path)
}
