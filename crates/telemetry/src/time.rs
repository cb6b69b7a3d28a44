// Path: crates/telemetry/src/time.rs
use std::time::Instant;

/// Logs how long a named stage took when dropped.
pub struct StageTimer {
    stage: &'static str,
    start: Instant,
}

impl StageTimer {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }

    /// The stage name this timer reports under.
    pub fn stage(&self) -> &'static str {
        self.stage
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "telemetry",
            stage = self.stage,
            elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
            "stage finished"
        );
    }
}
