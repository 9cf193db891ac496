use crate::config::load_config;
use crate::ir::ChartSpec;
use crate::layout::compute_chart_layout;
use crate::layout_dump::write_layout_dump;
use crate::measure::measurer_for;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sclayout",
    version,
    about = "Stack value labels and size legends for survey charts"
)]
pub struct Args {
    /// Chart file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Layout JSON output. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Use the built-in width table instead of installed fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Log layout decisions
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", args.config))?;
    if let Some(width) = args.width {
        config.layout.chart.width = width;
    }
    if args.fast_text {
        config.layout.fast_text_metrics = true;
    }

    let input = read_input(args.input.as_deref())?;
    let spec = ChartSpec::from_json(&input).context("invalid chart file")?;
    let measurer = measurer_for(config.layout.fast_text_metrics);
    let layout = compute_chart_layout(&spec, measurer.as_ref(), &config.theme, &config.layout)?;
    tracing::info!(
        kind = ?layout.kind,
        labels = layout.labels.len(),
        height = layout.height,
        "chart laid out"
    );
    write_layout_dump(args.output.as_deref(), &layout)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
