//! Frame-rate statistics and frame timing

use std::collections::VecDeque;

use crate::consts::FALLBACK_DELTA_MS;

/// Sliding window of instantaneous frame rates (oldest dropped first)
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(crate::consts::FPS_WINDOW)
    }
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a frame that took `delta_ms` (must be positive)
    pub fn record(&mut self, delta_ms: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(1000.0 / delta_ms);
    }

    /// Mean fps over the window (0 before the first frame)
    pub fn average_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| f64::from(s)).sum();
        (sum / self.samples.len() as f64) as f32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Turns the host's absolute frame timestamps into tick deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    fallback_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FALLBACK_DELTA_MS)
    }
}

impl FrameClock {
    pub fn new(fallback_ms: f32) -> Self {
        Self {
            last_timestamp_ms: None,
            fallback_ms,
        }
    }

    /// Delta since the previous frame; the fallback on the first frame or when
    /// the timestamp did not advance
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last_timestamp_ms {
            Some(last) if timestamp_ms > last => (timestamp_ms - last) as f32,
            _ => self.fallback_ms,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        delta
    }
}
