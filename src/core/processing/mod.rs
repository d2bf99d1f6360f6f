pub mod canvas;
pub mod collage;
pub mod resize;
