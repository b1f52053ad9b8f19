//! EMD Binary
//!
//! Distances from one source signature to any number of targets.
//! Targets are solved in parallel; results go to stdout as JSON lines.
//!
//! Type "Q" + Enter to abandon running solves.

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use simplex_emd::*;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Earth Mover's Distance between point signatures", long_about = None)]
struct Args {
    /// JSON signature: a list of [[coordinates...], weight] pairs
    #[arg(required = true)]
    source: PathBuf,
    /// JSON signatures to measure against the source
    #[arg(required = true)]
    targets: Vec<PathBuf>,
    /// Ground distance between points
    #[arg(long, default_value_t = Metric::Euclidean)]
    metric: Metric,
    /// Relative tolerance (overrides EMD_EPSILON)
    #[arg(long)]
    epsilon: Option<Energy>,
    /// Pivot cap (overrides EMD_ITERATIONS)
    #[arg(long)]
    iterations: Option<usize>,
    /// Trace level written to stderr (overrides EMD_VERBOSITY)
    #[arg(long)]
    verbosity: Option<Verbosity>,
    /// Include the optimal flows in the output
    #[arg(long)]
    flows: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env().context("reading EMD_* environment")?;
        if let Some(epsilon) = self.epsilon {
            config = config.epsilon(epsilon);
        }
        if let Some(iterations) = self.iterations {
            config = config.iterations(iterations);
        }
        if let Some(verbosity) = self.verbosity {
            config = config.verbosity(verbosity);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Writes trace events to stderr, one JSON object per line.
struct Lines {
    target: usize,
}

impl Sink for Lines {
    fn record(&mut self, event: Event) {
        eprintln!("{}", serde_json::json!({ "target": self.target, "trace": event }));
    }
}

fn read(path: &Path) -> anyhow::Result<Signature<Point>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn solve(
    source: &Signature<Point>,
    target: &Signature<Point>,
    index: usize,
    args: &Args,
    config: Config,
) -> anyhow::Result<serde_json::Value> {
    let ref mut sink = Lines { target: index };
    let plan = Simplex::from((source, target, &args.metric))
        .config(config)
        .sink(sink)
        .interrupt(&INTERRUPTED)
        .minimize()?;
    let mut line = serde_json::json!({
        "target": args.targets[index].display().to_string(),
        "distance": plan.distance(),
        "work": plan.work(),
        "mass": plan.mass(),
        "iterations": plan.iterations(),
    });
    if args.flows {
        line["flows"] = plan
            .flows()
            .map(|(x, y, mass)| serde_json::json!({ "from": x, "to": y, "mass": mass }))
            .collect();
    }
    Ok(line)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;
    log(config.verbosity.into());
    brb();
    let source = read(&args.source)?;
    let targets = args
        .targets
        .iter()
        .map(|path| read(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    log::info!(
        "measuring {} targets under {} with {:?}",
        targets.len(),
        args.metric,
        config
    );
    let results = targets
        .par_iter()
        .enumerate()
        .map(|(index, target)| solve(&source, target, index, &args, config))
        .collect::<Vec<_>>();
    let mut failures = 0;
    for (path, result) in args.targets.iter().zip(results) {
        match result {
            Ok(line) => println!("{}", line),
            Err(e) => {
                failures += 1;
                log::error!("{}: {:#}", path.display(), e);
            }
        }
    }
    match failures {
        0 => Ok(()),
        n => anyhow::bail!("{} of {} targets failed", n, args.targets.len()),
    }
}
