//! Metrics for task-store operations.

use metrics::{counter, histogram};
use std::time::Instant;

/// Result class of one store call, used as the `outcome` label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Ok,
    Error,
    Timeout,
}

impl StoreOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOutcome::Ok => "ok",
            StoreOutcome::Error => "error",
            StoreOutcome::Timeout => "timeout",
        }
    }
}

/// Task store metrics recorder
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one finished store call
    pub fn record(operation: &'static str, outcome: StoreOutcome, duration_secs: f64) {
        counter!(
            "task_store_operations_total",
            "operation" => operation,
            "outcome" => outcome.as_str()
        )
        .increment(1);

        histogram!("task_store_operation_duration_seconds", "operation" => operation)
            .record(duration_secs);

        if outcome == StoreOutcome::Timeout {
            counter!("task_store_timeouts_total", "operation" => operation).increment(1);
            tracing::warn!(
                operation = operation,
                duration_secs = duration_secs,
                "Task store call exceeded its deadline"
            );
        }
    }
}

/// Timer guard for store calls.
///
/// Records through [`StoreMetrics`] when `finish()` is called. A timer dropped
/// without finishing (the caller was cancelled) is recorded as an error.
pub struct StoreTimer {
    start: Instant,
    operation: &'static str,
    finished: bool,
}

impl StoreTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            finished: false,
        }
    }

    /// Stop the timer and record the outcome. Returns duration in milliseconds.
    pub fn finish(mut self, outcome: StoreOutcome) -> u64 {
        self.record(outcome)
    }

    fn record(&mut self, outcome: StoreOutcome) -> u64 {
        if self.finished {
            return 0;
        }
        self.finished = true;

        let elapsed = self.start.elapsed();
        StoreMetrics::record(self.operation, outcome, elapsed.as_secs_f64());
        elapsed.as_millis() as u64
    }
}

impl Drop for StoreTimer {
    fn drop(&mut self) {
        if !self.finished {
            self.record(StoreOutcome::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(StoreOutcome::Ok.as_str(), "ok");
        assert_eq!(StoreOutcome::Error.as_str(), "error");
        assert_eq!(StoreOutcome::Timeout.as_str(), "timeout");
    }

    #[test]
    fn test_timer_finish_records_once() {
        let timer = StoreTimer::start("insert_one");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let elapsed_ms = timer.finish(StoreOutcome::Ok);
        assert!(elapsed_ms >= 2);
    }

    #[test]
    fn test_timer_drop_without_finish_does_not_panic() {
        let timer = StoreTimer::start("delete_one");
        drop(timer);
    }
}
