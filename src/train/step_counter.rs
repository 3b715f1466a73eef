use std::sync::atomic::{AtomicI64, Ordering};

/// The persistent training-step counter: one 64-bit integer, initialized
/// to zero, incremented by exactly one per training step. Lives for the
/// process only; its value is recorded in the export manifest like any
/// other variable.
pub struct StepCounter {
    value: AtomicI64,
}

impl StepCounter {
    pub fn new() -> StepCounter {
        StepCounter {
            value: AtomicI64::new(0),
        }
    }

    /// Atomic add-by-one; returns the post-increment value.
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn read(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

impl Default for StepCounter {
    fn default() -> Self {
        StepCounter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_counts_up() {
        let counter = StepCounter::new();
        assert_eq!(counter.read(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.increment(), 3);
        assert_eq!(counter.read(), 3);
    }
}
