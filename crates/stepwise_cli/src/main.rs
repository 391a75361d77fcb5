//! Stepwise CLI
//!
//! Record algorithm traces and replay them step by step from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use stepwise_algorithms::{create_trace, AlgorithmId, Snapshot, Trace};
use stepwise_playback::{Phase, PlaybackDriver};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::StepwiseConfig;

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Record and replay step-by-step algorithm traces", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a stepwise.toml (defaults to ./stepwise.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List algorithms with their example inputs
    List,

    /// Record a trace and print it as JSON
    Record {
        /// Algorithm id, e.g. `dutch-flag`
        algorithm: AlgorithmId,

        /// Input as JSON, or `@path` to read it from a file
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the trace
        #[arg(long)]
        pretty: bool,
    },

    /// Replay a trace, printing each step as it is reached
    Play {
        /// Algorithm id, e.g. `dutch-flag`
        algorithm: AlgorithmId,

        /// Input as JSON, or `@path` to read it from a file
        #[arg(short, long)]
        input: Option<String>,

        /// Delay between steps in milliseconds
        #[arg(short, long)]
        speed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StepwiseConfig::load(cli.config.as_deref())?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };

    // stdout carries trace output, logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Record {
            algorithm,
            input,
            pretty,
        } => cmd_record(algorithm, input.as_deref(), pretty || config.output.pretty),
        Commands::Play {
            algorithm,
            input,
            speed,
        } => cmd_play(
            algorithm,
            input.as_deref(),
            speed.unwrap_or(config.playback.speed_ms),
        ),
    }
}

fn cmd_list() -> Result<()> {
    for &id in AlgorithmId::ALL {
        let input = serde_json::to_string(&id.example_input())?;
        println!("{:<20} {:<8} {}", id.name(), category_name(id), id.title());
        println!("{:<20} input: {}", "", input);
    }
    Ok(())
}

fn category_name(id: AlgorithmId) -> String {
    serde_json::to_value(id.category())
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn cmd_record(algorithm: AlgorithmId, input: Option<&str>, pretty: bool) -> Result<()> {
    let trace = build_trace(algorithm, input)?;
    let json = if pretty {
        serde_json::to_string_pretty(&trace)
    } else {
        serde_json::to_string(&trace)
    }
    .context("Failed to serialize trace")?;
    println!("{}", json);
    Ok(())
}

fn cmd_play(algorithm: AlgorithmId, input: Option<&str>, speed_ms: u64) -> Result<()> {
    let trace = Arc::new(build_trace(algorithm, input)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let driver = PlaybackDriver::spawn(trace.clone(), speed_ms)
            .with_context(|| format!("Cannot play {} at {} ms", algorithm, speed_ms))?;
        let mut updates = driver.updates();

        info!("Playing {} ({} steps, {} ms per step)", algorithm, trace.len(), speed_ms);
        driver.play();

        let mut printed = None;
        while let Some(snapshot) = updates.recv().await {
            if printed != Some(snapshot.cursor) {
                print_step(&trace, snapshot.cursor);
                printed = Some(snapshot.cursor);
            }
            if snapshot.phase == Phase::Finished {
                break;
            }
        }

        driver.dispose().await;
        Ok::<(), anyhow::Error>(())
    })
}

fn print_step(trace: &Trace<Snapshot>, index: usize) {
    if let Some(step) = trace.get(index) {
        let marker = if step.is_terminal { "=" } else { " " };
        println!("{}[{:>3}/{}] {}", marker, index, trace.last_index(), step.label);
    }
}

fn build_trace(algorithm: AlgorithmId, input: Option<&str>) -> Result<Trace<Snapshot>> {
    let input = read_input(algorithm, input)?;
    debug!("Recording {} with input {}", algorithm, input);
    let trace = create_trace(algorithm, input)
        .with_context(|| format!("Failed to record {}", algorithm))?;
    debug!("Recorded {} steps", trace.len());
    Ok(trace)
}

fn read_input(algorithm: AlgorithmId, input: Option<&str>) -> Result<Value> {
    let text = match input {
        None => return Ok(algorithm.example_input()),
        Some(arg) => match arg.strip_prefix('@') {
            Some(path) => {
                fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
            }
            None => arg.to_string(),
        },
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}
