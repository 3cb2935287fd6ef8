//! Command-line interface for benchmark binaries.
//!
//! A binary that registers its suite and hands it to [`run_main`] gets the
//! whole surface: `list` prints the registered names, `run` executes a
//! selection on the console, and `drive <path>` serves one controller
//! command read from stdin, streaming wire-encoded reports to the given
//! path. Status and error lines go to stderr so stdout stays clean for
//! event output.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use crate::config::Config;
use crate::output::{format_duration, JsonOutput, Output, PrettyOutput};
use crate::protocol::{Command, OutputFormat, Report, RunOptions};
use crate::runner::Runner;
use crate::suite::Suite;
use crate::timer::pin_to_core;

#[derive(Debug, Parser)]
#[command(name = "scalebench", about = "Size-parameterized benchmark runner")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print the registered benchmark names, one per line
    List,
    /// Execute benchmarks and report to the console
    Run(RunArgs),
    /// Serve one JSON command from stdin, reporting to the file at PATH
    Drive {
        /// Report channel; must already exist (e.g. a named pipe)
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Benchmark to run; repeatable, defaults to the whole suite
    #[arg(short = 't', long = "tasks", value_name = "NAME")]
    tasks: Vec<String>,

    /// Run every registered benchmark
    #[arg(short = 'a', long, conflicts_with = "tasks")]
    all_tasks: bool,

    /// Workload size; repeatable, executed in the given order
    #[arg(short = 's', long = "sizes", value_name = "N", required = true)]
    sizes: Vec<usize>,

    /// Iteration floor per (task, size) pair
    #[arg(short = 'i', long, value_name = "N")]
    iterations: Option<usize>,

    /// Keep iterating until this many seconds have accumulated
    #[arg(long, value_name = "SECS")]
    min_duration: Option<f64>,

    /// Stop iterating once this many seconds have accumulated
    #[arg(long, value_name = "SECS")]
    max_duration: Option<f64>,

    /// Event rendering: pretty or json
    #[arg(short = 'f', long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Pin the process to one core before measuring
    #[arg(long, value_name = "CORE")]
    pin_cpu: Option<usize>,
}

/// Parses the process arguments and executes them against `suite`. Exits
/// non-zero with a red stderr message on any error; intended as the whole
/// body of a benchmark binary's `main`.
pub fn run_main(suite: Suite) {
    let cli = Cli::parse();
    if let Err(error) = execute(suite, cli.command) {
        eprintln!("{} {:#}", "error:".red().bold(), error);
        process::exit(1);
    }
}

fn execute(mut suite: Suite, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::List => {
            let mut stdout = io::stdout().lock();
            for name in suite.names() {
                writeln!(stdout, "{}", name)?;
            }
            Ok(())
        }
        CliCommand::Run(args) => {
            let config = Config::load().context("failed to load configuration")?;
            run_console(&mut suite, args, &config)
        }
        CliCommand::Drive { path } => drive(&mut suite, io::stdin().lock(), &path),
    }
}

fn run_console(suite: &mut Suite, args: RunArgs, config: &Config) -> Result<()> {
    let pin = args.pin_cpu.or(config.pin_cpu);
    let options = build_options(args, config);

    if let Some(core) = pin {
        pin_to_core(core).with_context(|| format!("failed to pin to core {}", core))?;
    }

    let task_count = if options.tasks.is_empty() {
        suite.len()
    } else {
        options.tasks.len()
    };
    let smallest = options.sizes.iter().min().copied().unwrap_or(0);
    let largest = options.sizes.iter().max().copied().unwrap_or(0);
    eprintln!(
        "{} {} task(s) at {} size(s) from {} to {}",
        "Running".green().bold(),
        task_count,
        options.sizes.len(),
        smallest.to_string().cyan(),
        largest.to_string().cyan()
    );

    let started = Instant::now();
    let mut output: Box<dyn Output> = match options.output_format {
        OutputFormat::Pretty => Box::new(PrettyOutput::stdout()),
        OutputFormat::Json => Box::new(JsonOutput::stdout()),
    };
    Runner::new(suite, &options).run(output.as_mut())?;

    eprintln!(
        "{} in {}",
        "Completed".green().bold(),
        format_duration(started.elapsed()).bold()
    );
    Ok(())
}

/// Merges run flags over the loaded config. Flags win; the config supplies
/// whatever the flags leave unset.
fn build_options(args: RunArgs, config: &Config) -> RunOptions {
    RunOptions {
        tasks: if args.all_tasks { Vec::new() } else { args.tasks },
        sizes: args.sizes,
        output_format: args.format.unwrap_or(config.format),
        iterations: args.iterations.unwrap_or(config.iterations),
        minimum_duration: args.min_duration.or(config.min_duration),
        maximum_duration: args.max_duration.or(config.max_duration),
    }
}

/// Serves one controller command: reads a single JSON [`Command`] from
/// `input` (to EOF) and answers on the report channel at `path`. The path
/// must already exist; a missing channel is fatal before anything runs.
/// Driven runs always put the wire encoding on the channel, whatever the
/// command's `outputFormat` says.
fn drive(suite: &mut Suite, mut input: impl Read, path: &Path) -> Result<()> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("failed to read command from stdin")?;
    let command: Command =
        serde_json::from_str(&raw).context("failed to decode command")?;

    let channel = OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("failed to open report channel '{}'", path.display()))?;
    let mut writer = BufWriter::new(channel);

    match command {
        Command::List {} => {
            let report = Report::List {
                tasks: suite.names(),
            };
            let line = serde_json::to_string(&report)?;
            writeln!(writer, "{}", line)?;
            // Flush before the channel drops so the controller sees the
            // full line; no sleep needed, close delivers buffered data.
            writer.flush()?;
            Ok(())
        }
        Command::Run(options) => {
            let mut output = JsonOutput::new(writer);
            Runner::new(suite, &options).run(&mut output)?;
            Ok(())
        }
    }
}
