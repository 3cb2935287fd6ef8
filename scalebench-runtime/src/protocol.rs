//! Wire types for driving a benchmark process from an external controller.
//!
//! The controller writes one JSON `Command` to the process's input channel;
//! the process answers with newline-delimited JSON `Report` values on the
//! report channel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering selected for a non-driven run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable console lines.
    #[default]
    Pretty,
    /// One wire-shaped JSON value per event.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => f.write_str("pretty"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}' (expected 'pretty' or 'json')",
                other
            )),
        }
    }
}

/// Options controlling a run, supplied by the controller or the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Task names to run; empty selects the whole suite in registration
    /// order.
    #[serde(default)]
    pub tasks: Vec<String>,
    /// Workload sizes, in execution order. Must be non-empty and all >= 1.
    pub sizes: Vec<usize>,
    /// Rendering for non-driven runs. Driven runs always put the wire
    /// encoding on the report channel.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Iteration floor: each (task, size) pair is executed at least this
    /// many times, subject to the duration bounds.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Keep iterating until at least this many seconds have accumulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_duration: Option<f64>,
    /// Hard cap on accumulated seconds; stops the loop even before the
    /// iteration floor is met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_duration: Option<f64>,
}

fn default_iterations() -> usize {
    1
}

impl RunOptions {
    /// Options that run the whole suite once per size with default bounds.
    pub fn for_sizes(sizes: Vec<usize>) -> RunOptions {
        RunOptions {
            tasks: Vec::new(),
            sizes,
            output_format: OutputFormat::default(),
            iterations: default_iterations(),
            minimum_duration: None,
            maximum_duration: None,
        }
    }
}

/// A single instruction read from the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Request the registered benchmark names.
    List {},
    /// Execute benchmarks under the given options.
    Run(RunOptions),
}

/// One value written to the report channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Report {
    /// Answer to [`Command::List`]: names in registration order.
    List { tasks: Vec<String> },
    /// A (task, size) pair entered its measurement loop.
    Begin { task: String, size: usize },
    /// One timed execution completed; `time` is that iteration's own
    /// elapsed seconds, not the running minimum.
    Progress { task: String, size: usize, time: f64 },
    /// A pair completed; `time` is the minimum elapsed seconds observed
    /// across all of its iterations.
    Finish { task: String, size: usize, time: f64 },
}
