use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cagr", version, about = "Compare CAGR with and without interest")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-year value and CAGR series.
    Compute(ComputeArgs),
    /// Write the two-panel chart as SVG (`.svg` extension) or PNG.
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// JSON file with any of `beginning_value`, `annual_growth`, `years`, `interest_rate`.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Starting value (default 20.0).
    #[arg(long, allow_negative_numbers = true)]
    beginning_value: Option<f64>,

    /// Linear growth per year (default 20.0).
    #[arg(long, allow_negative_numbers = true)]
    annual_growth: Option<f64>,

    /// Number of years (default 30).
    #[arg(long)]
    years: Option<u32>,

    /// Fractional interest rate per year (default 0.0).
    #[arg(long, allow_negative_numbers = true)]
    interest_rate: Option<f64>,

    /// Skip the interactive control ranges (1..=100, 1..=100, 1..=50, 0..=0.2).
    #[arg(long)]
    unbounded: bool,
}

#[derive(Args, Debug)]
struct ComputeArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Emit the series as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output path; `.svg` writes the vector document, anything else a PNG.
    #[arg(long)]
    out: PathBuf,

    /// Unannotated chart with a solid grid.
    #[arg(long)]
    plain: bool,

    /// Canvas width in px.
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Canvas height in px.
    #[arg(long, default_value_t = 1200)]
    height: u32,

    /// PNG scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Compute(args) => cmd_compute(args),
        Command::Plot(args) => cmd_plot(args),
    }
}

fn init_logging(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn read_params_json(path: &Path) -> anyhow::Result<cagr_compare::GrowthParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params = cagr_compare::GrowthParams::from_json_reader(r)
        .with_context(|| format!("parse params JSON '{}'", path.display()))?;
    Ok(params)
}

fn resolve_params(args: &ParamArgs) -> anyhow::Result<cagr_compare::GrowthParams> {
    let mut params = match &args.params {
        Some(path) => read_params_json(path)?,
        None => cagr_compare::GrowthParams::default(),
    };
    if let Some(v) = args.beginning_value {
        params.beginning_value = v;
    }
    if let Some(v) = args.annual_growth {
        params.annual_growth = v;
    }
    if let Some(v) = args.years {
        params.years = v;
    }
    if let Some(v) = args.interest_rate {
        params.interest_rate = v;
    }

    if !args.unbounded {
        cagr_compare::InputBounds::interactive().check(&params)?;
    }
    tracing::info!(?params, "resolved parameters");
    Ok(params)
}

fn cmd_compute(args: ComputeArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let series = params.compute()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &series).context("serialize series")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>5}  {:>14}  {:>14}  {:>12}  {:>12}",
        "year", "without", "with", "cagr_without", "cagr_with"
    )?;
    for row in series.rows() {
        writeln!(
            out,
            "{:>5}  {:>14}  {:>14}  {:>12}  {:>12}",
            row.year,
            cagr_compare::value_label(row.without_interest),
            cagr_compare::value_label(row.with_interest),
            cagr_compare::cagr_label(row.without_interest_cagr),
            cagr_compare::cagr_label(row.with_interest_cagr),
        )?;
    }
    Ok(())
}

fn cmd_plot(args: PlotArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let series = params.compute()?;

    let base = if args.plain {
        cagr_compare::ChartOpts::plain()
    } else {
        cagr_compare::ChartOpts::default()
    };
    let opts = cagr_compare::ChartOpts {
        width: args.width,
        height: args.height,
        ..base
    };

    let svg = cagr_compare::render_svg(&series, &opts)?;
    if is_svg_path(&args.out) {
        cagr_compare::write_svg(&args.out, &svg)?;
    } else {
        let img = cagr_compare::rasterize_svg(&svg, args.scale)?;
        cagr_compare::write_png(&args.out, &img)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}
