//! Counter command handler

use crate::output::Reporter;
use crate::CounterArgs;
use showcase_animations::core::create_counter;

/// The first `times` values of a counter starting at `initial`
#[must_use]
pub fn counter_sequence(initial: i64, times: usize) -> Vec<i64> {
    let mut counter = create_counter(initial);
    (0..times).map(|_| counter.advance()).collect()
}

/// Execute the counter command
pub fn execute_counter(reporter: &Reporter, args: &CounterArgs) {
    reporter.header(&format!("Counter from {}", args.initial));
    let values: Vec<String> = counter_sequence(args.initial, args.times)
        .iter()
        .map(ToString::to_string)
        .collect();
    reporter.raw(&values.join(" "));
}
