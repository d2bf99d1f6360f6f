use tracing::info;
use tracing_subscriber::EnvFilter;

use imgcollage::{
    CollageParams, PixelSource, ResizeParams, blank_canvas, collage_to_path, load_params,
    resize_directory_to_path, resize_path_to_path, save_canvas,
};

use super::args::{BatchArgs, BlankArgs, CliArgs, CollageArgs, Command, ResizeArgs, ResizeOpts};
use super::errors::AppError;

fn resize_params(opts: &ResizeOpts) -> Result<ResizeParams, AppError> {
    let mut params = match &opts.config {
        Some(path) => load_params::<ResizeParams>(path)?,
        None => ResizeParams::default(),
    };
    if let Some(rate) = opts.rate {
        params.rate = rate;
    }
    if let Some(algorithm) = opts.algorithm {
        params.algorithm = algorithm;
    }
    if let Some(bg) = &opts.background {
        params.background = bg.clone();
    }
    Ok(params)
}

fn collage_params(args: &CollageArgs) -> Result<CollageParams, AppError> {
    let mut params = match &args.config {
        Some(path) => load_params::<CollageParams>(path)?,
        None => CollageParams::default(),
    };
    if let Some(bg) = &args.background {
        params.background = bg.clone();
    }
    if let Some(margin) = args.margin {
        params.margin = margin;
    }
    if let Some(algorithm) = args.algorithm {
        params.algorithm = algorithm;
    }
    params.parallel |= args.parallel;
    params.sidecar |= args.sidecar;
    Ok(params)
}

fn run_resize(args: ResizeArgs) -> Result<(), AppError> {
    let params = resize_params(&args.opts)?;
    let (w, h) = resize_path_to_path(&args.input, &args.output, &params)?;
    info!(
        "Successfully resized: {:?} -> {:?} ({}x{}, {})",
        args.input, args.output, w, h, params.algorithm
    );
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    if !args.input_dir.is_dir() {
        return Err(AppError::NotADirectory {
            path: args.input_dir.display().to_string(),
        });
    }
    let params = resize_params(&args.opts)?;

    info!("Starting batch processing from directory: {:?}", args.input_dir);
    info!("Output directory: {:?}", args.output_dir);

    let report = resize_directory_to_path(
        &args.input_dir,
        &args.output_dir,
        &params,
        args.format,
        args.continue_on_error,
    )?;

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    Ok(())
}

fn run_collage(args: CollageArgs) -> Result<(), AppError> {
    let params = collage_params(&args)?;
    let collage = collage_to_path(&args.inputs, &args.output, &params)?;
    info!(
        "Successfully created collage {:?}: {} images, {}x{} grid, {}x{} px",
        args.output,
        collage.placements.len(),
        collage.layout.columns,
        collage.layout.rows,
        collage.canvas.width(),
        collage.canvas.height()
    );
    Ok(())
}

fn run_blank(args: BlankArgs) -> Result<(), AppError> {
    let canvas = blank_canvas(args.aspect, args.rate, &args.color)?;
    save_canvas(&canvas, &args.output)?;
    info!(
        "Wrote {} canvas {}x{} to {:?}",
        args.aspect,
        canvas.width(),
        canvas.height(),
        args.output
    );
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match args.command {
        Command::Resize(a) => run_resize(a)?,
        Command::Batch(a) => run_batch(a)?,
        Command::Collage(a) => run_collage(a)?,
        Command::Blank(a) => run_blank(a)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use imgcollage::ResampleAlg;

    #[test]
    fn collage_flags_override_defaults() {
        let args = CliArgs::parse_from([
            "imgcollage", "collage", "a.png", "b.png", "-o", "out.png", "--margin", "1.5",
            "--background", "black", "--parallel",
        ]);
        let Command::Collage(c) = args.command else {
            panic!("expected collage subcommand");
        };
        let params = collage_params(&c).unwrap();
        assert_eq!(c.inputs.len(), 2);
        assert_eq!(params.margin, 1.5);
        assert_eq!(params.background, "black");
        assert!(params.parallel);
        assert!(!params.sidecar);
        assert_eq!(params.algorithm, ResampleAlg::Area);
    }

    #[test]
    fn collage_without_inputs_is_a_usage_error() {
        let err = CliArgs::try_parse_from(["imgcollage", "collage", "-o", "out.png"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn resize_flags_layer_over_config_preset() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("p.json");
        std::fs::write(&preset, r#"{"rate": 0.25, "algorithm": "nearest", "background": "red"}"#).unwrap();
        let args = CliArgs::parse_from([
            "imgcollage",
            "resize",
            "-i",
            "in.png",
            "-o",
            "out.png",
            "--rate",
            "2",
            "--config",
            preset.to_str().unwrap(),
        ]);
        let Command::Resize(r) = args.command else {
            panic!("expected resize subcommand");
        };
        let params = resize_params(&r.opts).unwrap();
        assert_eq!(params.rate, 2.0);
        assert_eq!(params.algorithm, ResampleAlg::Nearest);
        assert_eq!(params.background, "red");
    }

    #[test]
    fn blank_parses_aspect() {
        let args = CliArgs::parse_from(["imgcollage", "blank", "--aspect", "4:3", "-o", "b.png"]);
        let Command::Blank(b) = args.command else {
            panic!("expected blank subcommand");
        };
        assert_eq!(b.aspect.to_size(b.rate), (400, 300));
        assert!(CliArgs::try_parse_from(["imgcollage", "blank", "--aspect", "4x3", "-o", "b.png"]).is_err());
    }
}
