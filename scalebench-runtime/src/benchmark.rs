use std::error::Error;

use crate::generators::InputGenerator;
use crate::timer::Timer;

/// Error type benchmark bodies may fail with.
pub type BenchError = Box<dyn Error + Send + Sync>;

/// A named, size-parameterized unit of measured work.
///
/// The runner drives the lifecycle per (task, size) pair: one `prepare`,
/// one or more timed `execute_once` calls, then exactly one `release` —
/// release runs even when an execution failed.
pub trait Benchmark {
    /// Correlation key used in every reported event. Unique within a suite.
    fn name(&self) -> &str;

    /// Builds per-size input. Returning false declines the size and the
    /// runner skips the pair without emitting any events.
    fn prepare(&mut self, size: usize) -> bool;

    /// Performs one measured unit of work. The whole call is timed unless
    /// the body marks a precise region on `timer`. A failure aborts the
    /// whole run.
    fn execute_once(&mut self, timer: &mut Timer) -> Result<(), BenchError>;

    /// Drops per-size state.
    fn release(&mut self);
}

/// A benchmark assembled from an input generator and a body closure.
///
/// `prepare` regenerates the input for the requested size (accepting every
/// size), the body runs against a reference to it, and `release` drops it.
pub struct ClosureBenchmark<G, F>
where
    G: InputGenerator,
    F: FnMut(&mut Timer, &G::Value),
{
    name: String,
    generator: G,
    body: F,
    input: Option<G::Value>,
}

impl<G, F> ClosureBenchmark<G, F>
where
    G: InputGenerator,
    F: FnMut(&mut Timer, &G::Value),
{
    pub fn new(name: impl Into<String>, generator: G, body: F) -> Self {
        ClosureBenchmark {
            name: name.into(),
            generator,
            body,
            input: None,
        }
    }
}

impl<G, F> Benchmark for ClosureBenchmark<G, F>
where
    G: InputGenerator,
    F: FnMut(&mut Timer, &G::Value),
{
    fn name(&self) -> &str {
        &self.name
    }

    fn prepare(&mut self, size: usize) -> bool {
        self.input = Some(self.generator.generate(size));
        true
    }

    fn execute_once(&mut self, timer: &mut Timer) -> Result<(), BenchError> {
        match &self.input {
            Some(input) => {
                (self.body)(timer, input);
                Ok(())
            }
            None => Err("benchmark executed without prepared input".into()),
        }
    }

    fn release(&mut self) {
        self.input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_closure_benchmark_lifecycle() {
        let seen = Rc::new(Cell::new(0usize));
        let seen_by_body = Rc::clone(&seen);

        let mut bench = ClosureBenchmark::new(
            "double",
            |size: usize| size * 2,
            move |_timer: &mut Timer, input: &usize| {
                seen_by_body.set(*input);
            },
        );

        assert_eq!(bench.name(), "double");
        assert!(bench.prepare(21));

        let elapsed = Timer::time_call(|t| bench.execute_once(t)).unwrap();
        assert_eq!(seen.get(), 42);
        assert!(elapsed > std::time::Duration::ZERO);

        bench.release();
    }

    #[test]
    fn test_prepare_regenerates_input() {
        let seen = Rc::new(Cell::new(0usize));
        let seen_by_body = Rc::clone(&seen);

        let mut bench = ClosureBenchmark::new(
            "count",
            |size: usize| vec![0u8; size],
            move |_timer: &mut Timer, input: &Vec<u8>| {
                seen_by_body.set(input.len());
            },
        );

        assert!(bench.prepare(4));
        Timer::time_call(|t| bench.execute_once(t)).unwrap();
        assert_eq!(seen.get(), 4);

        assert!(bench.prepare(9));
        Timer::time_call(|t| bench.execute_once(t)).unwrap();
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_execute_without_prepare_fails() {
        let mut bench = ClosureBenchmark::new(
            "unprepared",
            |size: usize| size,
            |_timer: &mut Timer, _input: &usize| {},
        );

        let result = Timer::time_call(|t| bench.execute_once(t));
        assert!(result.is_err());
    }

    #[test]
    fn test_release_drops_input() {
        let mut bench = ClosureBenchmark::new(
            "dropped",
            |size: usize| size,
            |_timer: &mut Timer, _input: &usize| {},
        );

        assert!(bench.prepare(1));
        bench.release();

        let result = Timer::time_call(|t| bench.execute_once(t));
        assert!(result.is_err());
    }
}
