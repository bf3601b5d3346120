use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use dslab_batch::config::SimulationConfig;
use dslab_batch::experiment::Experiment;

fn init_logger() {
    use env_logger::Builder;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Compares queue ordering and fit policies of batch job placement
struct Args {
    /// Path to YAML file with simulation configuration (default configuration is used if not set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to produced CSV file with utilization time series
    #[arg(short, long, default_value = "utilization.csv")]
    output: PathBuf,

    /// Path to produced CSV file with job placements
    #[arg(short, long)]
    placements: Option<PathBuf>,

    /// Path to produced JSON file with run results
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Seed for workload generation, overrides the config value
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: Args) -> dslab_batch::Result<bool> {
    let mut experiment = match &args.config {
        Some(path) => Experiment::load(path)?,
        None => Experiment::new(SimulationConfig::default()),
    };
    if let Some(seed) = args.seed {
        experiment = experiment.with_seed(seed);
    }
    let config = experiment.config();
    log::info!(
        "Simulating {} jobs on {} nodes ({} cores, {} memory), {} runs",
        config.workload.job_count,
        config.node_count,
        config.node_cores,
        config.node_memory,
        config.runs.len()
    );

    let start = Instant::now();
    let results = experiment.run()?;
    log::info!(
        "Performed {} runs in {:.2}s, {} failed",
        results.runs.len(),
        start.elapsed().as_secs_f64(),
        results.failed_runs()
    );
    for run in &results.runs {
        if let Some(result) = &run.result {
            log::info!(
                "{}/{}: {} jobs placed in {} rounds, cpu utilization {:.2}%, memory utilization {:.2}%",
                run.run.queue,
                run.run.fit,
                result.placements.len(),
                result.rounds,
                result.cpu_utilization,
                result.memory_utilization
            );
        }
    }

    results.save_utilization(&args.output)?;
    if let Some(path) = &args.placements {
        results.save_placements(path)?;
    }
    if let Some(path) = &args.summary {
        results.save_summary(path)?;
    }
    Ok(results.failed_runs() == 0)
}

fn main() -> ExitCode {
    init_logger();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
