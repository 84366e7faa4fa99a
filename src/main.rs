use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use sortkit::banner::{BannerInfo, print_banner, print_summary, result_line, sorter_listing};
use sortkit::consts::{DEFAULT_QUICK_DEPTH_LIMIT, DEMO_INPUT, LOG_ENV, MAX_QUICK_DEPTH_LIMIT};
use sortkit::engine::dispatch::{EngineConfig, SortEngine};
use sortkit::engine::{Engine, Outcome};
use sortkit::events::Event;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser)]
#[command(name = "sortkit", version, about = "Six ways to put numbers in order, one at a time or all at once.")]
struct Cli {
    /// Values to sort (defaults to a small demo sequence)
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Run a single algorithm instead of all of them concurrently
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Sort N random values in [-1000, 1000] instead of VALUES
    #[arg(short, long, conflicts_with = "values")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// List the available sorters and exit
    #[arg(short, long, default_value_t = false)]
    list: bool,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print only the results, in a stable order
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Quicksort recursion depth before it switches to an explicit stack
    /// (values above 1024 are clamped)
    #[arg(long, default_value_t = DEFAULT_QUICK_DEPTH_LIMIT)]
    depth_limit: usize,

    /// Log level (overridden by SORTKIT_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

impl Cli {
    fn chatty(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[derive(Serialize)]
struct SequentialOutput<'a> {
    algorithm: &'a str,
    sorted: &'a [i64],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let input = match cli.random {
        Some(count) => random_input(count, cli.seed),
        None if cli.values.is_empty() => DEMO_INPUT.to_vec(),
        None => cli.values.clone(),
    };

    if cli.depth_limit > MAX_QUICK_DEPTH_LIMIT {
        tracing::warn!(
            requested = cli.depth_limit,
            max = MAX_QUICK_DEPTH_LIMIT,
            "quicksort depth limit clamped"
        );
    }

    let engine = SortEngine::new(EngineConfig {
        quick_depth_limit: cli.depth_limit,
        ..EngineConfig::default()
    })
    .await;

    if cli.list {
        print!("{}", sorter_listing(&engine.sorters().descriptions().await));
        return Ok(());
    }

    match cli.algorithm.as_deref() {
        Some(name) => run_sequential(&cli, &engine, name, &input).await,
        None => run_concurrent(&cli, &engine, &input).await,
    }
}

async fn run_sequential(
    cli: &Cli,
    engine: &SortEngine,
    name: &str,
    input: &[i64],
) -> anyhow::Result<()> {
    let sorter = engine.resolve(name).await?;
    let name = sorter.name();

    if cli.chatty() {
        print_banner(&BannerInfo {
            mode: "sequential",
            algorithms: &[name.to_string()],
            input_len: input.len(),
        });
    }

    let sorted = engine.sort_sequential(name, Some(input)).await?;

    if cli.json {
        let output = SequentialOutput {
            algorithm: name,
            sorted: &sorted,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", result_line(name, &sorted));
    }
    Ok(())
}

async fn run_concurrent(cli: &Cli, engine: &SortEngine, input: &[i64]) -> anyhow::Result<()> {
    let algorithms = engine.sorters().names().await;

    if cli.chatty() {
        print_banner(&BannerInfo {
            mode: "concurrent",
            algorithms: &algorithms,
            input_len: input.len(),
        });
    }

    // Print each result the moment its task completes, in whatever order that is
    let listener = cli.chatty().then(|| {
        let mut rx = engine.subscribe();
        let expected = algorithms.len();
        tokio::spawn(async move {
            let mut done = 0;
            while done < expected {
                match rx.recv().await {
                    Ok(event) => {
                        match &event {
                            Event::Finished { sorted, .. } => {
                                println!("{}", result_line(event.algorithm(), sorted))
                            }
                            Event::Failed { reason, .. } => {
                                eprintln!("{} sort failed: {}", event.algorithm(), reason)
                            }
                            Event::Started { .. } => {}
                        }
                        if event.is_terminal() {
                            done += 1;
                        }
                    }
                    // May over-count, so we never wait on an event that was dropped
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event listener lagged");
                        done += skipped as usize;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    });

    let report = engine.sort_all_concurrently(Some(input)).await?;

    if let Some(listener) = listener {
        listener.await?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.quiet {
        for result in &report.results {
            if let Outcome::Sorted(sorted) = &result.outcome {
                println!("{}", result_line(&result.algorithm, sorted));
            }
        }
    } else {
        print_summary(&report);
    }

    let failed = report.failures().len();
    if failed > 0 {
        anyhow::bail!("{} sort task(s) failed", failed);
    }
    Ok(())
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn random_input(count: usize, seed: Option<u64>) -> Vec<i64> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(count, seed, "generating random input");
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(-1000..=1000)).collect()
}
