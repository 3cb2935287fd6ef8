//! Input generators for size-parameterized benchmarks.

use rand::seq::SliceRandom;

/// Produces a benchmark input of a requested size.
///
/// Implemented by any `Fn(usize) -> T` closure, so ad-hoc generators need no
/// wrapper type.
pub trait InputGenerator {
    type Value;

    fn generate(&self, size: usize) -> Self::Value;
}

impl<F, T> InputGenerator for F
where
    F: Fn(usize) -> T,
{
    type Value = T;

    fn generate(&self, size: usize) -> T {
        self(size)
    }
}

/// Shuffled permutation of `0..size`.
pub struct RandomArray;

impl InputGenerator for RandomArray {
    type Value = Vec<usize>;

    fn generate(&self, size: usize) -> Vec<usize> {
        let mut values: Vec<usize> = (0..size).collect();
        values.shuffle(&mut rand::thread_rng());
        values
    }
}

/// Runs two generators at the same size and pairs their outputs. Useful for
/// workloads that need both a haystack and a set of needles.
pub struct Pair<A, B>(pub A, pub B);

impl<A, B> InputGenerator for Pair<A, B>
where
    A: InputGenerator,
    B: InputGenerator,
{
    type Value = (A::Value, B::Value);

    fn generate(&self, size: usize) -> Self::Value {
        (self.0.generate(size), self.1.generate(size))
    }
}
