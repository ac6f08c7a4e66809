//! `pagerank`: rank the nodes of a JSON adjacency list.
//!
//! ```text
//! echo '[[1,2,3],[3],[0,3],[0,2]]' | pagerank
//! pagerank graph.json --spec rank.json --scores
//! pagerank --demo 5
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rapid_pagerank::demo::demo_graph;
use rapid_pagerank::pipeline::observer::StageTimingObserver;
use rapid_pagerank::{NodeIndex, NoopObserver, Pipeline, RankConfig, RankSpec, SolverKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Dense,
    Power,
}

impl From<SolverArg> for SolverKind {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::Dense => SolverKind::DenseEigen,
            SolverArg::Power => SolverKind::PowerIteration,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pagerank", version, about = "Rank graph nodes by PageRank")]
struct Cli {
    /// JSON adjacency list (entry j lists the nodes j links to); stdin if omitted
    input: Option<PathBuf>,

    /// Rank a bundled demo graph (1-5) instead of reading input
    #[arg(long, value_name = "N", conflicts_with = "input")]
    demo: Option<usize>,

    /// JSON ranking spec
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Override the configured damping factor
    #[arg(long)]
    damping: Option<f64>,

    /// Override the configured solver
    #[arg(long, value_enum)]
    solver: Option<SolverArg>,

    /// Print `node<TAB>weight` lines instead of a JSON array
    #[arg(long)]
    scores: bool,

    /// Print per-stage timings to stderr
    #[arg(long)]
    timings: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut spec = match &cli.spec {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading spec {}", path.display()))?;
            RankSpec::from_json(&text)
                .with_context(|| format!("parsing spec {}", path.display()))?
        }
        None => RankSpec::default(),
    };
    if let Some(damping) = cli.damping {
        spec.damping = Some(damping);
    }
    if let Some(solver) = cli.solver {
        spec.modules.solver = Some(solver.into());
    }

    let cfg = checked_config(&spec)?;

    let links = load_links(&cli)?;
    let pipeline = Pipeline::new(&cfg);

    let output = if cli.timings {
        let mut observer = StageTimingObserver::new();
        let output = pipeline.run(&links, &mut observer)?;
        for (stage, report) in &observer.reports {
            eprintln!("{stage:<10} {:>10.3?}", report.elapsed);
        }
        eprintln!("{:<10} {:>10.3?}", "total", observer.total());
        output
    } else {
        pipeline.run(&links, &mut NoopObserver)?
    };

    if cli.scores {
        for (node, weight) in output.top_n(output.len()) {
            println!("{node}\t{weight:.6}");
        }
    } else {
        println!("{}", serde_json::to_string(&output.order)?);
    }

    Ok(())
}

/// Validate `spec` once: log its warnings, fail on errors, then resolve.
fn checked_config(spec: &RankSpec) -> Result<RankConfig> {
    let report = spec.validate();
    for warning in report.warnings() {
        tracing::warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
    }
    if report.has_errors() {
        return Err(report.into());
    }
    Ok(spec.resolve())
}

fn load_links(cli: &Cli) -> Result<Vec<Vec<NodeIndex>>> {
    if let Some(id) = cli.demo {
        return match demo_graph(id) {
            Some(links) => Ok(links),
            None => bail!("no demo graph {id}; choose 1-5"),
        };
    }

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading graph {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading graph from stdin")?;
            buf
        }
    };

    serde_json::from_str(&text).context("graph must be a JSON array of arrays of node indices")
}
