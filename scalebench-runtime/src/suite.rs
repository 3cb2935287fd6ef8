use crate::benchmark::{Benchmark, ClosureBenchmark};
use crate::generators::InputGenerator;
use crate::timer::Timer;

/// Ordered collection of benchmarks.
///
/// Registration order is significant: it defines the default execution order
/// and the order of list responses. Names are not forced to be unique;
/// lookups return the first match, so duplicates are a caller mistake.
#[derive(Default)]
pub struct Suite {
    benchmarks: Vec<Box<dyn Benchmark>>,
}

impl Suite {
    pub fn new() -> Suite {
        Suite {
            benchmarks: Vec::new(),
        }
    }

    /// Appends a benchmark at the end of the execution order.
    pub fn add(&mut self, benchmark: impl Benchmark + 'static) {
        self.benchmarks.push(Box::new(benchmark));
    }

    /// Appends a benchmark assembled from an input generator and a body
    /// closure.
    pub fn add_fn<G, F>(&mut self, name: impl Into<String>, generator: G, body: F)
    where
        G: InputGenerator + 'static,
        F: FnMut(&mut Timer, &G::Value) + 'static,
    {
        self.add(ClosureBenchmark::new(name, generator, body));
    }

    /// Registered benchmark names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.benchmarks
            .iter()
            .map(|b| b.name().to_string())
            .collect()
    }

    /// First benchmark registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&dyn Benchmark> {
        self.benchmarks
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.benchmarks.iter().position(|b| b.name() == name)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut dyn Benchmark {
        self.benchmarks[index].as_mut()
    }
}
