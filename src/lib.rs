#![doc = r#"
imgcollage — raster resizing and uniform-grid collages.

This crate resizes images with pluggable resamplers (nearest neighbor,
flux-conserving area average, bilinear, Lanczos3) and assembles any number of
images into a single grid "collage" where every cell has the same size and
each image is scaled to fit its cell without distortion, then centered.
It powers the `imgcollage` CLI and can be embedded in your own applications.

Quick start: collage to a file
------------------------------
```rust,no_run
use std::path::Path;
use imgcollage::{collage_to_path, CollageParams, ResampleAlg};

fn main() -> imgcollage::Result<()> {
    let params = CollageParams {
        background: "white".to_string(),
        margin: 1.1,
        algorithm: ResampleAlg::Area,
        parallel: true,
        sidecar: true,
    };
    let collage = collage_to_path(
        &["a.png", "b.jpg", "c.png"],
        Path::new("collage.png"),
        &params,
    )?;
    println!("{}x{} grid", collage.layout.columns, collage.layout.rows);
    Ok(())
}
```

In-memory resize
----------------
```rust
use imgcollage::{Canvas, Rate, ResampleAlg, Rgba, PixelSource};

let src = Canvas::filled(8, 6, Rgba::opaque(10, 20, 30));
let half = ResampleAlg::Area
    .resample(&src, Rate::new(0.5).unwrap(), Rgba::TRANSPARENT)
    .unwrap();
assert_eq!(half.dimensions(), (4, 3));
assert_eq!(half.get_pixel(0, 0), Rgba::opaque(10, 20, 30));
```

Error handling
--------------
All public functions return `imgcollage::Result<T>`. `Error::kind()` sorts
failures into I/O (decode, encode, unsupported extension) and input
(empty list, non-positive rate or margin, malformed aspect, unknown color).

```rust
use imgcollage::{collage, Error, ErrorKind};

let none: [&str; 0] = [];
match collage(&none, "white", 1.1) {
    Err(e @ Error::EmptyInput) => assert_eq!(e.kind(), ErrorKind::Input),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points over paths and files.
- [`core`] — canvas, resamplers, collage layout, colors, aspect ratios, presets.
- [`io`] — decoding and PNG/JPEG/JSON writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::aspect::Aspect;
pub use crate::core::color::{Rgba, resolve_color};
pub use crate::core::params::{CollageParams, ResizeParams, load_params};
pub use crate::core::processing::canvas::{Canvas, PixelSource, Rect};
pub use crate::core::processing::collage::{
    AggregateStats, Collage, CollageOptions, GridLayout, Placement, compose_collage,
};
pub use crate::core::processing::resize::{Rate, resize_image};
pub use error::{Error, ErrorKind, Result};
pub use types::{OutputFormat, ResampleAlg};

// I/O helpers
pub use io::writers::sidecar::{CollageSidecar, write_collage_sidecar};
pub use io::{decode_all, decode_image, save_canvas};

// High-level API re-exports
pub use api::{
    BatchReport, blank_canvas, collage, collage_to_path, collage_with_params,
    resize_directory_to_path, resize_path_to_path, resize_with_params,
};
