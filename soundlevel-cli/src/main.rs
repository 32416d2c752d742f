use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Serialize;
use soundlevel::{ChartOptions, FormattedReadout, Readout, SweepMode, render_png};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// soundlevel - Sound level of a point source
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "soundlevel")]
#[command(about = "Intensity, decibel level and safety band of an isotropic point source", long_about = None)]
struct Cli {
    /// Source power as a power of ten: P = 10^E watts (default: 0, i.e. 1 W)
    #[arg(short = 'p', long, value_name = "E", default_value = "0", allow_negative_numbers = true)]
    power_exp: f64,

    /// Distance from the source in metres (default: 1.0)
    #[arg(short = 'r', long, value_name = "METRES", default_value = "1.0")]
    distance: f64,

    /// Which input the chart sweeps
    #[arg(short = 'm', long, value_enum, default_value = "distance")]
    mode: ModeArg,

    /// Write the level chart as PNG to this path
    #[arg(short, long, value_name = "PNG_PATH")]
    output: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value = "720")]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "360")]
    height: u32,

    /// Print the readout as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    /// Sweep distance on a linear axis
    Distance,
    /// Sweep power on a logarithmic axis
    Power,
}

impl From<ModeArg> for SweepMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Distance => SweepMode::Distance,
            ModeArg::Power => SweepMode::Power,
        }
    }
}

/// JSON output for one run
#[derive(Debug, Serialize)]
struct Report<'a> {
    mode: SweepMode,
    values: &'a Readout,
    text: &'a FormattedReadout,
    /// Requested chart path, written after the report is printed
    chart: Option<&'a PathBuf>,
}

fn validate(args: &Cli) -> Result<()> {
    ensure!(
        args.power_exp.is_finite(),
        "power exponent must be a finite number, got {}",
        args.power_exp
    );
    ensure!(
        args.distance.is_finite() && args.distance > 0.0,
        "distance must be a positive number of metres, got {}",
        args.distance
    );
    Ok(())
}

fn write_chart(args: &Cli, readout: &Readout, path: &Path) -> Result<()> {
    let options = ChartOptions::new()
        .width(args.width)
        .height(args.height)
        .build()
        .context("invalid chart options")?;

    let render_start = Instant::now();
    let png = render_png(
        args.mode.into(),
        readout.power,
        readout.distance,
        &options,
    )
    .context("failed to render level chart")?;
    debug!("Rendered chart in {:?}", render_start.elapsed());

    std::fs::write(path, &png)
        .with_context(|| format!("failed to write chart to {}", path.display()))?;
    info!("Chart written to {} ({} bytes)", path.display(), png.len());
    Ok(())
}

/// Print the readout to `out`, then write the chart if one was asked for.
///
/// The readout goes out first so a failed render still leaves it on screen.
fn run(args: &Cli, out: &mut impl Write) -> Result<()> {
    validate(args)?;

    let readout = Readout::compute(args.power_exp, args.distance);
    let text = readout.formatted();
    debug!(?readout, "computed readout");

    if args.json {
        let report = Report {
            mode: args.mode.into(),
            values: &readout,
            text: &text,
            chart: args.output.as_ref(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{text}")?;
    }
    out.flush()?;

    if let Some(path) = &args.output {
        write_chart(args, &readout, path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&args, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_one_watt_at_one_metre() {
        let args = Cli::try_parse_from(["soundlevel"]).unwrap();
        assert_eq!(args.power_exp, 0.0);
        assert_eq!(args.distance, 1.0);
        assert!(matches!(args.mode, ModeArg::Distance));
        assert!(args.output.is_none());
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn accepts_negative_exponent_and_power_mode() {
        let args =
            Cli::try_parse_from(["soundlevel", "-p", "-6", "-r", "10", "--mode", "power"]).unwrap();
        assert_eq!(args.power_exp, -6.0);
        assert_eq!(SweepMode::from(args.mode), SweepMode::Power);
    }

    #[test]
    fn rejects_non_positive_distance() {
        let args = Cli::try_parse_from(["soundlevel", "--distance", "0"]).unwrap();
        assert!(validate(&args).is_err());
        let args = Cli::try_parse_from(["soundlevel", "--distance=-2"]).unwrap();
        assert_eq!(args.distance, -2.0);
        assert!(validate(&args).is_err());
        let args = Cli::try_parse_from(["soundlevel", "--distance", "nan"]).unwrap();
        assert!(validate(&args).is_err());
    }

    #[test]
    fn readout_is_printed_before_a_failing_chart() {
        let output = std::env::temp_dir().join("soundlevel-never-written.png");
        let args = Cli::try_parse_from([
            "soundlevel",
            "--width",
            "0",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let mut out = Vec::new();
        let err = run(&args, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "failed to render level chart");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Power:"));
        assert!(printed.contains("extreme"));
        assert!(!output.exists());
    }

    #[test]
    fn json_output_is_one_document() {
        let args = Cli::try_parse_from(["soundlevel", "--json", "-p", "-6", "-r", "10"]).unwrap();
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["mode"], "distance");
        assert_eq!(json["values"]["safety"], "weak");
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["soundlevel", "--mode", "volume"]).is_err());
    }

    #[test]
    fn report_serializes_mode_and_values() {
        let readout = Readout::compute(0.0, 1.0);
        let text = readout.formatted();
        let report = Report {
            mode: SweepMode::Power,
            values: &readout,
            text: &text,
            chart: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "power");
        assert_eq!(json["text"]["level"], "109.0");
        assert_eq!(json["values"]["safety"], "extreme");
        assert!(json["chart"].is_null());
    }
}
