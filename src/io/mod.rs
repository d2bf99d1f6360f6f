//! I/O layer: decoding source images (`reader`) and `writers` for PNG/JPEG
//! outputs plus the JSON layout sidecar.
pub mod reader;
pub use reader::{decode_all, decode_image};

pub mod writers;
pub use writers::save_canvas;
