//! Frame sources that drive [`RotationEngine::run`](super::RotationEngine::run).
//!
//! A scheduler hands out one timestamp (milliseconds) per display refresh.
//! Returning `None` means the host tore the loop down.
//!
//! - [`FixedStepScheduler`] – deterministic timestamps, no waiting
//! - [`IntervalScheduler`] – wall clock, sleeps until the next ~60Hz frame
//!
//! [`LoopHandle`] is the explicit start/stop switch shared between the engine
//! and anything that wants to end its loop (including its own listeners).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Default refresh interval, 60 frames per second.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

pub trait FrameScheduler {
    /// Wait for the next frame and return its timestamp in milliseconds.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Emits evenly spaced timestamps immediately. Useful for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    now: f64,
    interval: f64,
    remaining: Option<u64>,
}

impl FixedStepScheduler {
    pub fn new(interval_ms: f64) -> Self {
        FixedStepScheduler {
            now: 0.0,
            interval: interval_ms,
            remaining: None,
        }
    }

    /// Stop handing out frames after `frames` more.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Timestamp of the most recently issued frame.
    pub fn now(&self) -> f64 {
        self.now
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.now += self.interval;
        Some(self.now)
    }
}

/// Paces frames against the wall clock.
#[derive(Debug)]
pub struct IntervalScheduler {
    started: Instant,
    interval: Duration,
    next_deadline: Instant,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        IntervalScheduler {
            started: now,
            interval,
            next_deadline: now + interval,
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(FRAME_INTERVAL_MS / 1000.0))
    }
}

impl FrameScheduler for IntervalScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        let now = Instant::now();
        if now < self.next_deadline {
            thread::sleep(self.next_deadline - now);
        }
        // Skip missed frames instead of bursting to catch up
        let now = Instant::now();
        self.next_deadline = (self.next_deadline + self.interval).max(now);
        Some(now.duration_since(self.started).as_secs_f64() * 1000.0)
    }
}

/// Shared running flag for an engine's frame loop.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
}

impl LoopHandle {
    pub(crate) fn new(running: bool) -> Self {
        LoopHandle {
            running: Arc::new(AtomicBool::new(running)),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
