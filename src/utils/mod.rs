use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Times a run stage by stage; logs the whole run when dropped.
pub struct StageTimer {
    label: &'static str,
    start: Instant,
    last: Instant,
    stages: Vec<(&'static str, Duration)>,
}

impl StageTimer {
    pub fn start(label: &'static str) -> Self {
        let now = Instant::now();
        Self {
            label,
            start: now,
            last: now,
            stages: Vec::new(),
        }
    }

    /// Close the current stage and return its duration.
    pub fn lap(&mut self, stage: &'static str) -> Duration {
        let now = Instant::now();
        let took = now - self.last;
        self.last = now;
        self.stages.push((stage, took));
        debug!("{}: {} took {:.2?}", self.label, stage, took);
        took
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let stages: Vec<String> = self
            .stages
            .iter()
            .map(|(name, took)| format!("{name}={took:.2?}"))
            .collect();
        info!(
            "{} finished in {:.2?} [{}]",
            self.label,
            self.start.elapsed(),
            stages.join(" ")
        );
    }
}

/// Current time as unix seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laps_are_recorded_in_order() {
        let mut timer = StageTimer::start("run");
        timer.lap("fetch");
        timer.lap("extract");

        let names: Vec<&str> = timer.stages.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["fetch", "extract"]);

        let total: Duration = timer.stages.iter().map(|(_, d)| *d).sum();
        assert!(total <= timer.start.elapsed());
    }

    #[test]
    fn test_unix_now_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(unix_now() > 1_704_067_200);
    }
}
