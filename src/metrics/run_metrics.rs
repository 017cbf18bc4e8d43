use std::time::{Duration, Instant};

/// Wall-clock timing of one simulation run
pub struct RunMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub finished: bool,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            finished: false,
        }
    }

    /// Refresh the elapsed time; frozen once the run has finished
    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_run_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.finished = false;
    }

    pub fn on_run_end(&mut self) {
        self.update();
        self.finished = true;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Elapsed time in seconds with millisecond precision
    pub fn format_seconds(&self) -> String {
        format!("{:.3}", self.elapsed_time.as_secs_f64())
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
