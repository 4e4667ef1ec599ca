// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line demo for `textfit`.
//!
//! Fits a set of text surfaces described by a JSON job (or a built-in clock
//! face) against the retained layout host and prints the chosen sizes.

use serde::{Deserialize, Serialize};
use textfit::{FitOutcome, FitSettings, RetainedOracle, RetainedSurface, TextFitter};
use textfit_text::{FontFamily, HeuristicTextMeasurer, LineHeight, TextMeasurer, TextStyle};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("failed to read job: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid job: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} of {1} surfaces failed to fit")]
    Failed(usize, usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum MeasurerKind {
    #[default]
    Heuristic,
    #[cfg(feature = "parley")]
    Parley,
}

#[derive(Debug, Default)]
struct Args {
    measurer: MeasurerKind,
    pretty: bool,
    input: Option<String>,
}

/// A fit job: shared settings plus the surfaces to fit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Job {
    #[serde(default)]
    settings: FitSettings,
    surfaces: Vec<SurfaceSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurfaceSpec {
    name: String,
    width: f64,
    height: f64,
    #[serde(default)]
    padding: f64,
    text: String,
    #[serde(default = "default_font_size")]
    font_size: f64,
    #[serde(default)]
    font_family: Option<String>,
    #[serde(default)]
    line_height: Option<f64>,
}

fn default_font_size() -> f64 {
    16.0
}

impl SurfaceSpec {
    fn to_surface(&self) -> RetainedSurface {
        let mut style = TextStyle::new(self.font_size);
        if let Some(family) = &self.font_family {
            style = style.with_family(FontFamily::from_css(family));
        }
        if let Some(line_height) = self.line_height {
            style = style.with_line_height(LineHeight::Relative(line_height));
        }
        RetainedSurface::new(self.text.clone(), self.width, self.height)
            .with_padding(self.padding)
            .with_style(style)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SurfaceOut<'a> {
    name: &'a str,
    font_size: Option<f64>,
    best_fit: Option<u32>,
    probes: Option<u32>,
    multi_line: Option<bool>,
    overflowing: Option<bool>,
    error: Option<String>,
}

fn usage() -> &'static str {
    "textfit_demo\n\
\n\
USAGE:\n\
  textfit_demo [--measurer heuristic|parley] [--pretty] [<job.json>]\n\
\n\
NOTES:\n\
  - Without a job file, a built-in clock face is fitted.\n\
  - The parley measurer requires the `parley` feature.\n\
  - Set RUST_LOG=debug to trace the search.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--measurer" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.measurer = match kind.as_str() {
                    "heuristic" => MeasurerKind::Heuristic,
                    #[cfg(feature = "parley")]
                    "parley" => MeasurerKind::Parley,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }
    Ok(args)
}

fn clock_job() -> Job {
    let face = |name: &str, text: &str, height: f64| SurfaceSpec {
        name: name.to_string(),
        width: 800.0,
        height,
        padding: 8.0,
        text: text.to_string(),
        font_size: 16.0,
        font_family: Some("Nova Mono".to_string()),
        line_height: Some(1.2),
    };
    Job {
        settings: FitSettings::default()
            .with_align_vert(true)
            .with_align_horiz(true)
            .with_scale_factor(0.8),
        surfaces: vec![
            face("time", "12:45", 240.0),
            face("date", "Monday, October 19", 80.0),
            face(
                "events",
                "Standup at 09:30\nTake out the recycling",
                120.0,
            ),
        ],
    }
}

fn load_job(input: Option<&str>) -> Result<Job, CliError> {
    let Some(path) = input else {
        log::info!("no job file given; fitting the built-in clock face");
        return Ok(clock_job());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn run(args: Args) -> Result<(), CliError> {
    let job = load_job(args.input.as_deref())?;

    #[cfg(feature = "parley")]
    let parley_measurer;
    let measurer: &dyn TextMeasurer = match args.measurer {
        MeasurerKind::Heuristic => &HeuristicTextMeasurer,
        #[cfg(feature = "parley")]
        MeasurerKind::Parley => {
            parley_measurer = textfit_parley::ParleyTextMeasurer::new();
            &parley_measurer
        }
    };

    let mut host = RetainedOracle::new(measurer);
    let ids: Vec<_> = job
        .surfaces
        .iter()
        .map(|spec| host.add_surface(spec.to_surface()))
        .collect();

    let mut fitter = TextFitter::new(host);
    let report = fitter.fit(ids.iter().copied(), &job.settings);
    log::info!(
        "fitted {} of {} surfaces ({} layout reads)",
        report.fitted_count(),
        report.len(),
        fitter.oracle().layout_passes()
    );

    let rows: Vec<SurfaceOut<'_>> = job
        .surfaces
        .iter()
        .zip(report.iter())
        .map(|(spec, (_, result))| {
            let mut row = SurfaceOut {
                name: &spec.name,
                font_size: None,
                best_fit: None,
                probes: None,
                multi_line: None,
                overflowing: None,
                error: None,
            };
            match result {
                Ok(FitOutcome::Fitted(size)) => {
                    row.font_size = Some(size.applied);
                    row.best_fit = Some(size.best_fit);
                    row.probes = Some(size.probes);
                    row.multi_line = Some(size.multi_line);
                    row.overflowing = Some(size.overflowing);
                }
                Ok(FitOutcome::Skipped) => {}
                Err(err) => row.error = Some(err.to_string()),
            }
            row
        })
        .collect();

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            print_row(row);
        }
    }

    let failed = report.errors().count();
    if failed > 0 {
        return Err(CliError::Failed(failed, report.len()));
    }
    Ok(())
}

fn print_row(row: &SurfaceOut<'_>) {
    if let Some(err) = &row.error {
        println!("  {:<8} error: {err}", row.name);
        return;
    }
    let (Some(font_size), Some(best_fit)) = (row.font_size, row.best_fit) else {
        println!("  {:<8} skipped", row.name);
        return;
    };
    let mut notes = String::new();
    if row.multi_line == Some(true) {
        notes.push_str(", multi-line");
    }
    if row.overflowing == Some(true) {
        notes.push_str(", overflowing");
    }
    println!(
        "  {:<8} {font_size}px (best fit {best_fit}px, {} probes{notes})",
        row.name,
        row.probes.unwrap_or(0)
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
