//! Demo benchmark suite exercising the ScaleBench runtime end to end.
//!
//! Run `scalebench-demos list` to see the registered tasks, or e.g.
//! `scalebench-demos run -a -s 1000 -s 100000 -i 5` for a console run.

use std::hint::black_box;

use rand::Rng;
use scalebench_runtime::generators::{Pair, RandomArray};
use scalebench_runtime::{cli, Suite};

fn sorted_array(size: usize) -> Vec<usize> {
    (0..size).collect()
}

fn needles(size: usize) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    (0..64).map(|_| rng.gen_range(0..size.max(1))).collect()
}

fn main() {
    let mut suite = Suite::new();

    // The clone is setup, not work under test, so only the sort itself is
    // in the timed region.
    suite.add_fn("sort", RandomArray, |timer, input: &Vec<usize>| {
        let mut values = input.clone();
        timer.measure(|| values.sort_unstable());
        black_box(values);
    });

    suite.add_fn(
        "binary-search",
        Pair(sorted_array, needles),
        |_timer, (haystack, needles): &(Vec<usize>, Vec<usize>)| {
            for needle in needles {
                black_box(haystack.binary_search(needle).ok());
            }
        },
    );

    suite.add_fn("sum", |size: usize| size, |_timer, &size: &usize| {
        black_box((0..size).sum::<usize>());
    });

    suite.add_fn("string-build", |size: usize| size, |_timer, &size: &usize| {
        let mut text = String::new();
        for value in 0..size {
            text.push(char::from(b'a' + (value % 26) as u8));
        }
        black_box(text);
    });

    cli::run_main(suite);
}
