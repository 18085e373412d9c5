#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stakepoll_poll::{AggregationStrategy, DomainParams, WeightedBallot};
use stakepoll_types::{Ballot, TokenAmount};

#[derive(Debug, Arbitrary)]
struct Input {
    strategy: u8,
    width: u64,
    min: i64,
    max: i64,
    ballots: Vec<(i64, bool, u128)>,
}

fuzz_target!(|input: Input| {
    let strategy = match input.strategy % 4 {
        0 => AggregationStrategy::Mean,
        1 => AggregationStrategy::Median,
        2 => AggregationStrategy::ClusteredMean { width: input.width },
        _ => AggregationStrategy::Increment,
    };
    let domain = if strategy == AggregationStrategy::Increment {
        DomainParams::increment(input.min, input.max)
    } else {
        DomainParams::range(input.min, input.max)
    };
    let ballots: Vec<WeightedBallot> = input
        .ballots
        .iter()
        .map(|&(value, signal, weight)| {
            let ballot = if strategy == AggregationStrategy::Increment {
                Ballot::Signal(signal)
            } else {
                Ballot::Value(value)
            };
            WeightedBallot::new(ballot, TokenAmount::new(weight))
        })
        .collect();

    // Arithmetic must report overflow, never wrap or panic.
    if strategy.validate().is_ok() {
        let _ = strategy.aggregate(&domain, &ballots);
    }
});
