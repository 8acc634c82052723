//! Tables are immutable after the build and may be read from many threads.

use std::sync::{Arc, Barrier};
use std::thread;

use decibinary::{tables, Solver, TableConfig, Tables};

#[test]
fn racing_first_callers_share_one_instance() {
    let start = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                tables::shared().unwrap() as *const Tables as usize
            })
        })
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn concurrent_queries_agree_with_sequential_ones() {
    let solver = Solver::new(&TableConfig::new(2_000)).unwrap();
    let max = solver.tables().max_rank() as i64;
    let ranks: Vec<i64> = (0..64).map(|i| 1 + i * (max - 1) / 63).collect();
    let sequential = solver.solve(&ranks).unwrap();

    let ranks = Arc::new(ranks);
    let results: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let solver = solver.clone();
                let ranks = Arc::clone(&ranks);
                scope.spawn(move || solver.solve(&ranks).unwrap())
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for answers in results {
        assert_eq!(answers, sequential);
    }
}

#[test]
fn rebuilding_gives_identical_tables() {
    let config = TableConfig::new(10_000);
    let first = Tables::build(&config).unwrap();
    let second = Tables::build(&config).unwrap();
    assert_eq!(first.counts(), second.counts());
    assert_eq!(first.partial_sums(), second.partial_sums());
    for value in 1..=10_001u32 {
        assert_eq!(first.sizes().histogram(value), second.sizes().histogram(value));
    }
}
