//! hatch-vision CLI: run the stripe pipeline over image files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hatch_vision::detect::{load_bgr, process_frame};
use hatch_vision::{CameraParams, FrameReport, HatchVisionPipeline, PipelineParams};
use log::{error, info, LevelFilter};
use serde::Serialize;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hatch-vision")]
#[command(about = "Detect FRC hatch vision targets (paired retroreflective stripes) in image files")]
#[command(version)]
struct Cli {
    /// Images to process, in order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// JSON file overriding any subset of the pipeline parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Horizontal field of view of the camera, degrees.
    #[arg(long, default_value_t = CameraParams::default().horizontal_fov_deg)]
    fov_deg: f64,

    /// Stderr log level.
    #[arg(long, value_enum, default_value_t = LogLevelArg::Warn)]
    log_level: LogLevelArg,

    /// Print one JSON object per image instead of text lines.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Serialize)]
struct ImageOutput<'a> {
    path: &'a Path,
    #[serde(flatten)]
    report: FrameReport,
}

fn init_logging(level: LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        let _ = level;
        let _ = tracing_log::LogTracer::init();
        hatch_vision::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = hatch_vision::core::init_with_level(level);
    }
}

fn load_params(path: Option<&Path>) -> CliResult<PipelineParams> {
    let Some(path) = path else {
        return Ok(PipelineParams::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    let params = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    info!("loaded parameters from {}", path.display());
    Ok(params)
}

fn run_image(
    pipeline: &mut HatchVisionPipeline,
    camera: &CameraParams,
    path: &Path,
    json: bool,
) -> CliResult<()> {
    let frame = load_bgr(path)?;
    let report = process_frame(pipeline, &frame.view(), camera)?;
    info!("{}: {}", path.display(), report.summary);

    if json {
        let out = ImageOutput { path, report };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        for target in &report.targets {
            let range = target.range_inches.unwrap_or(f64::INFINITY);
            println!("{} contains target at range {range:.2}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    let params = match load_params(cli.config.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let camera = CameraParams {
        horizontal_fov_deg: cli.fov_deg,
    };
    let mut pipeline = HatchVisionPipeline::new(params);

    let mut failures = 0usize;
    for path in &cli.images {
        if let Err(e) = run_image(&mut pipeline, &camera, path, cli.json) {
            error!("{}: {e}", path.display());
            eprintln!("error: {}: {e}", path.display());
            failures += 1;
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
