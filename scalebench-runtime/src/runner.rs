//! The measurement loop.
//!
//! A [`Runner`] walks sizes × selected benchmarks in order, times repeated
//! executions of each pair under the stopping policy, and reports the
//! minimum observed time as the pair's representative measurement. Taking
//! the minimum rather than the mean keeps scheduling jitter out of the
//! reported number: noise only ever adds time.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::benchmark::{BenchError, Benchmark};
use crate::output::Output;
use crate::protocol::RunOptions;
use crate::suite::Suite;
use crate::timer::Timer;

/// Everything that can end a run early. Configuration problems are caught
/// before the first measurement; execution and output failures abort the
/// run where they happen.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("need at least one size")]
    NoSizes,
    #[error("invalid size {0}")]
    InvalidSize(usize),
    #[error("invalid iteration count {0}")]
    InvalidIterations(usize),
    #[error("unknown task '{0}'")]
    UnknownTask(String),
    #[error("task '{task}' failed at size {size}: {source}")]
    Execution {
        task: String,
        size: usize,
        source: BenchError,
    },
    #[error("report output failed: {0}")]
    Output(#[from] io::Error),
}

/// Drives one run of a suite under a set of options.
///
/// Execution is strictly sequential: one benchmark at a time, one iteration
/// at a time, events emitted in the order they happen. The suite is only
/// touched through the benchmark lifecycle calls.
pub struct Runner<'a> {
    suite: &'a mut Suite,
    options: &'a RunOptions,
}

impl<'a> Runner<'a> {
    pub fn new(suite: &'a mut Suite, options: &'a RunOptions) -> Runner<'a> {
        Runner { suite, options }
    }

    /// Validates the options, resolves the task selection, and executes
    /// every (task, size) pair, pushing events to `output`.
    ///
    /// A benchmark that declines a size is skipped silently. A benchmark
    /// that fails aborts the whole run; its `release` still runs, but no
    /// `finish` is emitted for it and no further pairs are attempted.
    pub fn run(&mut self, output: &mut dyn Output) -> Result<(), RunError> {
        self.validate()?;
        let selected = self.resolve_selection()?;

        for &size in &self.options.sizes {
            for &index in &selected {
                let benchmark = self.suite.get_mut(index);
                if !benchmark.prepare(size) {
                    continue;
                }

                let task = benchmark.name().to_string();
                let result = measure_pair(benchmark, &task, size, self.options, output);
                benchmark.release();
                result?;
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), RunError> {
        if self.options.sizes.is_empty() {
            return Err(RunError::NoSizes);
        }
        if let Some(&size) = self.options.sizes.iter().find(|&&s| s < 1) {
            return Err(RunError::InvalidSize(size));
        }
        if self.options.iterations < 1 {
            return Err(RunError::InvalidIterations(self.options.iterations));
        }
        Ok(())
    }

    /// Maps the task selection to suite indices. An empty selection means
    /// the whole suite in registration order; otherwise execution follows
    /// the order the names were given in, and any unknown name fails the
    /// run before anything executes.
    fn resolve_selection(&self) -> Result<Vec<usize>, RunError> {
        if self.options.tasks.is_empty() {
            return Ok((0..self.suite.len()).collect());
        }

        self.options
            .tasks
            .iter()
            .map(|name| {
                self.suite
                    .position(name)
                    .ok_or_else(|| RunError::UnknownTask(name.clone()))
            })
            .collect()
    }
}

/// Runs the do-while measurement loop for one (task, size) pair. `begin`
/// has not been emitted yet; `release` is the caller's job.
fn measure_pair(
    benchmark: &mut dyn Benchmark,
    task: &str,
    size: usize,
    options: &RunOptions,
    output: &mut dyn Output,
) -> Result<(), RunError> {
    let minimum = options
        .minimum_duration
        .map(Duration::from_secs_f64)
        .unwrap_or(Duration::ZERO);
    let maximum = options.maximum_duration.map(Duration::from_secs_f64);

    output.begin(task, size)?;

    let mut iteration = 0usize;
    let mut cumulative = Duration::ZERO;
    let mut best = Duration::MAX;

    loop {
        let elapsed =
            Timer::time_call(|timer| benchmark.execute_once(timer)).map_err(|source| {
                RunError::Execution {
                    task: task.to_string(),
                    size,
                    source,
                }
            })?;

        iteration += 1;
        cumulative += elapsed;
        best = best.min(elapsed);
        output.progress(task, size, elapsed)?;

        // The maximum bound overrides the iteration floor; otherwise both
        // the iteration floor and the minimum-duration floor must be met.
        let hit_maximum = maximum.is_some_and(|max| cumulative >= max);
        let floors_met = iteration >= options.iterations && cumulative >= minimum;
        if hit_maximum || floors_met {
            break;
        }
    }

    output.finish(task, size, best)?;
    Ok(())
}
