//! Counters with private state.
//!
//! Each [`Counter`] owns its integer; the only way to observe it is
//! [`Counter::advance`], which also moves it forward. These counters are
//! unrelated to the page's global counter held by the stage.

/// Independent counter with private monotonic state
#[derive(Debug)]
pub struct Counter {
    count: i64,
}

impl Counter {
    /// Increments the private count and returns the new value
    pub fn advance(&mut self) -> i64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    /// Converts the counter into a bare closure with the same behaviour
    pub fn into_fn(mut self) -> impl FnMut() -> i64 {
        move || self.advance()
    }
}

impl Default for Counter {
    fn default() -> Self {
        create_counter(0)
    }
}

/// Creates a counter starting at `initial`; the first advance yields `initial + 1`
#[must_use]
pub fn create_counter(initial: i64) -> Counter {
    Counter { count: initial }
}
