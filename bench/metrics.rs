use std::time::Duration;

/// Wall-time samples for repeated runs of one configuration.
pub struct RunTimings {
    timings: Vec<f64>, // Milliseconds
}

impl RunTimings {
    pub fn new() -> Self {
        RunTimings {
            timings: Vec::new(),
        }
    }

    pub fn record_duration(&mut self, duration: Duration) {
        self.timings.push(duration.as_secs_f64() * 1000.0);
    }

    pub fn count(&self) -> usize {
        self.timings.len()
    }

    pub fn best(&self) -> Option<f64> {
        self.timings.iter().copied().reduce(f64::min)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.timings.is_empty() {
            return None;
        }
        Some(self.timings.iter().sum::<f64>() / self.timings.len() as f64)
    }

    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.timings.iter().map(|t| (t - mean).powi(2)).sum::<f64>()
            / self.timings.len() as f64;
        Some(variance.sqrt())
    }
}

impl Default for RunTimings {
    fn default() -> Self {
        Self::new()
    }
}
