use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use imgcollage::{Aspect, OutputFormat, ResampleAlg};

#[derive(Parser, Debug)]
#[command(name = "imgcollage", version, about = "Resize images and assemble grid collages")]
pub struct CliArgs {
    /// Enable logging (filtered by RUST_LOG, defaults to debug)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resize a single image by a scale factor
    Resize(ResizeArgs),
    /// Resize every PNG/JPEG in a directory
    Batch(BatchArgs),
    /// Assemble images into a uniform grid
    Collage(CollageArgs),
    /// Write a solid-color canvas of a given aspect ratio
    Blank(BlankArgs),
}

/// Resize options shared by `resize` and `batch`. Unset flags fall back to
/// the `--config` preset, then to the built-in defaults.
#[derive(Args, Debug)]
pub struct ResizeOpts {
    /// Scale factor; output dimension = floor(input * rate)
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Resampling algorithm
    #[arg(short, long, value_enum)]
    pub algorithm: Option<ResampleAlg>,

    /// Background color name or hex (#rrggbb, #rrggbbaa)
    #[arg(long)]
    pub background: Option<String>,

    /// JSON preset with resize parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Input image (PNG or JPEG)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output filename (.png, .jpg or .jpeg)
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub opts: ResizeOpts,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing input images
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for the resized outputs
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Output format for every file
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Keep going when a file fails to decode or encode
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    #[command(flatten)]
    pub opts: ResizeOpts,
}

#[derive(Args, Debug)]
pub struct CollageArgs {
    /// Input images, placed in the given order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output filename (.png, .jpg or .jpeg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Background color name or hex
    #[arg(long)]
    pub background: Option<String>,

    /// Whitespace multiplier for each cell (> 0)
    #[arg(short, long)]
    pub margin: Option<f64>,

    /// Resampling algorithm used for every image
    #[arg(short, long, value_enum)]
    pub algorithm: Option<ResampleAlg>,

    /// Resize images on the rayon thread pool
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Write a JSON layout sidecar next to the output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// JSON preset with collage parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BlankArgs {
    /// Aspect ratio as width:height, e.g. 16:9
    #[arg(long)]
    pub aspect: Aspect,

    /// Pixels per aspect unit
    #[arg(short, long, default_value_t = 100.0)]
    pub rate: f64,

    /// Fill color name or hex
    #[arg(long, default_value = "white")]
    pub color: String,

    /// Output filename (.png, .jpg or .jpeg)
    #[arg(short, long)]
    pub output: PathBuf,
}
