mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::{ClusterEvents, InputError, ParticleEvents, load_clusters, load_particles};
use crate::model::{SCORE_THRESHOLD, StyleConfig};
use crate::pipeline::PlotError;
use crate::pipeline::session::{PlotOutput, PurityPlots};
use crate::pipeline::stage5_report::write_reports;
use crate::report::SummaryData;

#[derive(Debug, Parser)]
#[command(
    name = "calo-purityqc",
    version,
    about = "CaloParticle purity and duplicate-rate plots versus eta, phi and energy"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count, bin and plot one or more datasets.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// CaloParticle event mapping (JSON, optionally .gz), once per dataset.
    #[arg(long = "particles", required = true)]
    particles: Vec<PathBuf>,
    /// Layer-cluster event mapping, parallel to --particles.
    #[arg(long = "clusters", required = true)]
    clusters: Vec<PathBuf>,
    /// Legend label, parallel to --particles.
    #[arg(long = "label")]
    labels: Vec<String>,
    /// Marker color, parallel to --particles.
    #[arg(long = "color")]
    colors: Vec<String>,
    /// Text placed on every panel.
    #[arg(long)]
    annotate: Option<String>,
    /// Output path prefix; nothing is written without it.
    #[arg(long = "out")]
    out: Option<String>,
    /// Style file, `{"cmsText": "..."}`.
    #[arg(long)]
    style: Option<PathBuf>,
    /// Also write `<prefix>summary.json` and `<prefix>report.txt`.
    #[arg(long, requires = "out")]
    report: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let particles = args
        .particles
        .iter()
        .map(|p| load_particles(p))
        .collect::<Result<Vec<ParticleEvents>, _>>()?;
    let clusters = args
        .clusters
        .iter()
        .map(|p| load_clusters(p))
        .collect::<Result<Vec<ClusterEvents>, _>>()?;
    let style = match &args.style {
        Some(path) => StyleConfig::load(path)?,
        None => StyleConfig::default(),
    };

    let plots = PurityPlots::new(&particles, &clusters)
        .annotate(args.annotate.clone())
        .legend(optional_list(&args.labels))
        .colors(args.colors.clone())
        .save(args.out.clone())
        .style(style.clone());
    let output = plots.run()?;
    log_overall(&output);

    let Some(prefix) = &args.out else {
        tracing::info!("no --out prefix given; figures not written");
        return Ok(());
    };
    for path in &output.figures {
        tracing::info!(path = %path.display(), "wrote figure");
    }

    if args.report {
        let summary = SummaryData {
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            style: &style,
            score_threshold: SCORE_THRESHOLD,
            annotation: args.annotate.as_deref(),
            tables: &output.tables,
        };
        for path in write_reports(&summary, prefix)? {
            tracing::info!(path = %path.display(), "wrote report");
        }
    }

    Ok(())
}

fn optional_list(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

fn log_overall(output: &PlotOutput) {
    let Some(table) = output.tables.first() else {
        return;
    };
    for dataset in &table.datasets {
        let o = &dataset.overall;
        tracing::info!(
            dataset = %dataset.label,
            counted = o.counted,
            purity = o.purity,
            duplicate_rate = o.duplicate_rate,
            "overall rates"
        );
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
