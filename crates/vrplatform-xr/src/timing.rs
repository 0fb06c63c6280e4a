// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame pacing instrumentation.
//!
//! [`Stopwatch`] measures a single frame; [`FrameTiming`] keeps a rolling
//! window of frame durations and derives percentile statistics from it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame budget of a 90 Hz headset, in milliseconds.
pub const DEFAULT_BUDGET_MS: f64 = 11.1;

/// Default number of samples kept in the rolling window.
pub const DEFAULT_WINDOW_SIZE: usize = 1000;

/// Measures the time elapsed since it was created or last restarted.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a new, running Stopwatch.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Restarts the stopwatch and returns the time elapsed before the restart.
    #[inline]
    pub fn restart(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.start_time = Instant::now();
        elapsed
    }

    /// Returns the elapsed time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in milliseconds as f64.
    #[inline]
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling frame timing statistics over a window of samples.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    samples: VecDeque<f64>,
    window_size: usize,
    total_frames: u64,
    missed_frames: u64,
    budget_ms: f64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, DEFAULT_BUDGET_MS)
    }
}

impl FrameTiming {
    /// Creates an empty tracker. A `window_size` of zero is treated as one.
    pub fn new(window_size: usize, budget_ms: f64) -> Self {
        let window_size = window_size.max(1);
        Self {
            samples: VecDeque::with_capacity(window_size),
            window_size,
            total_frames: 0,
            missed_frames: 0,
            budget_ms,
        }
    }

    /// Records one frame that took `frame_ms` milliseconds.
    pub fn record_frame(&mut self, frame_ms: f64) {
        if self.samples.len() == self.window_size {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_ms);

        self.total_frames += 1;
        if frame_ms > self.budget_ms {
            self.missed_frames += 1;
        }
    }

    /// Number of samples currently in the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Frames recorded since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames that exceeded the budget since creation.
    pub fn missed_frames(&self) -> u64 {
        self.missed_frames
    }

    /// The frame budget in milliseconds.
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = ((sorted.len() as f64 - 1.0) * p / 100.0).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Percentiles over the window, plus lifetime missed-frame counters.
    pub fn stats(&self) -> FrameTimingStats {
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let p50 = Self::percentile(&sorted, 50.0);
        FrameTimingStats {
            p50_ms: p50,
            p95_ms: Self::percentile(&sorted, 95.0),
            p99_ms: Self::percentile(&sorted, 99.0),
            fps: if p50 > 0.0 { 1000.0 / p50 } else { 0.0 },
            missed_pct: if self.total_frames > 0 {
                (self.missed_frames as f64 / self.total_frames as f64) * 100.0
            } else {
                0.0
            },
            total_frames: self.total_frames,
            missed_frames: self.missed_frames,
        }
    }
}

/// Computed frame timing statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimingStats {
    /// Median frame time.
    pub p50_ms: f64,
    /// 95th percentile frame time.
    pub p95_ms: f64,
    /// 99th percentile frame time.
    pub p99_ms: f64,
    /// Frames per second derived from the median.
    pub fps: f64,
    /// Share of frames over budget, in percent.
    pub missed_pct: f64,
    /// Frames recorded since creation.
    pub total_frames: u64,
    /// Frames over budget since creation.
    pub missed_frames: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let ft = FrameTiming::default();
        let stats = ft.stats();
        assert_eq!(stats.total_frames, 0);
        assert_eq!(stats.fps, 0.0);
        assert_eq!(stats.missed_pct, 0.0);
    }

    #[test]
    fn test_missed_frame_detection() {
        let mut ft = FrameTiming::new(100, 11.1);
        ft.record_frame(12.0);
        assert_eq!(ft.missed_frames(), 1);
        ft.record_frame(7.0);
        assert_eq!(ft.missed_frames(), 1);
        assert_eq!(ft.total_frames(), 2);
        assert!((ft.stats().missed_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_size_trim() {
        let mut ft = FrameTiming::new(5, 11.1);
        for i in 0..10 {
            ft.record_frame(i as f64);
        }
        assert_eq!(ft.sample_count(), 5);
        assert_eq!(ft.total_frames(), 10);
        // Window holds 5..=9.
        assert_eq!(ft.stats().p50_ms, 7.0);
    }

    #[test]
    fn test_fps_from_median() {
        let mut ft = FrameTiming::default();
        for _ in 0..3 {
            ft.record_frame(10.0);
        }
        let stats = ft.stats();
        assert!((stats.fps - 100.0).abs() < 1e-9);
        assert_eq!(stats.p99_ms, 10.0);
    }

    #[test]
    fn test_stopwatch_restart() {
        let mut sw = Stopwatch::new();
        std::thread::sleep(Duration::from_millis(2));
        let first = sw.restart();
        assert!(first >= Duration::from_millis(2));
        assert!(sw.elapsed() < first + Duration::from_secs(1));
    }
}
