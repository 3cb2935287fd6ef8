//! ScaleBench runtime: a size-parameterized benchmark execution engine.
//!
//! A benchmark binary registers named workloads in a [`Suite`], then hands
//! it to [`cli::run_main`]. Each workload is measured per (task, size) pair
//! in a do-while loop bounded by an iteration floor and duration floors/
//! caps, with the minimum observed time reported as the representative
//! measurement. Events stream to a console formatter or, in driven mode,
//! as newline-delimited JSON to a controller-supplied channel.
//!
//! ```no_run
//! use scalebench_runtime::{cli, generators::RandomArray, Suite};
//!
//! let mut suite = Suite::new();
//! suite.add_fn("sort", RandomArray, |timer, input: &Vec<usize>| {
//!     let mut values = input.clone();
//!     timer.measure(|| values.sort_unstable());
//! });
//! cli::run_main(suite);
//! ```

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod generators;
pub mod output;
pub mod protocol;
pub mod runner;
pub mod suite;
pub mod timer;

pub use benchmark::{BenchError, Benchmark, ClosureBenchmark};
pub use config::Config;
pub use output::{JsonOutput, Output, PrettyOutput};
pub use protocol::{Command, OutputFormat, Report, RunOptions};
pub use runner::{RunError, Runner};
pub use suite::Suite;
pub use timer::{pin_to_core, Timer};
