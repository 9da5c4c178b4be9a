use std::collections::VecDeque;
use std::time::{Duration, Instant};

const SAMPLE_COUNT: usize = 60;

/// Events per second over the last [`SAMPLE_COUNT`] occurrences.
#[derive(Debug, Default)]
pub struct RateMeter {
    times: VecDeque<Instant>,
    rate: f32,
}

impl RateMeter {
    pub fn record(&mut self, now: Instant) {
        if self.times.len() >= SAMPLE_COUNT {
            self.times.pop_front();
        }
        self.times.push_back(now);

        if let (Some(oldest), true) = (self.times.front(), self.times.len() >= 2) {
            let elapsed = now.saturating_duration_since(*oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.rate = (self.times.len() - 1) as f32 / elapsed;
            }
        }
    }

    /// Current rate, or zero once nothing was recorded for `stale`.
    pub fn rate(&self, now: Instant, stale: Duration) -> f32 {
        match self.times.back() {
            Some(last) if now.saturating_duration_since(*last) < stale => self.rate,
            _ => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.times.clear();
        self.rate = 0.0;
    }
}

#[derive(Debug, Default)]
pub struct DebugStats {
    pub frames: RateMeter,
    pub samples: RateMeter,
    pub snapshots: RateMeter,
}

impl DebugStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_session(&mut self) {
        self.samples.reset();
        self.snapshots.reset();
    }
}
