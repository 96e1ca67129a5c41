//! Frame timing
//!
//! `FrameStats` keeps a rolling window of frame durations so the runtime can
//! report the average frame rate in the debug log. `FramePacer` decides when
//! the next animation frame is due; panel motion is tuned per frame at 60 Hz,
//! so frames must not run faster than that.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const FRAME_HISTORY_SIZE: usize = 60;

/// Target interval between animation frames (60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// A requested redraw that has not arrived after this many intervals is
/// requested again
const STALL_FRAMES: u32 = 4;

#[derive(Debug, Default)]
pub struct FrameStats {
    frame_start: Option<Instant>,
    pub last_frame_time: Duration,
    pub frame_times: VecDeque<Duration>,
    pub total_frames: u64,
}

impl FrameStats {
    pub fn start_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    pub fn record_frame_time(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.push(start.elapsed());
        }
    }

    /// Record a frame duration measured elsewhere
    pub fn push(&mut self, duration: Duration) {
        self.last_frame_time = duration;
        self.total_frames += 1;
        self.frame_times.push_back(duration);
        if self.frame_times.len() > FRAME_HISTORY_SIZE {
            self.frame_times.pop_front();
        }
    }

    pub fn avg_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    /// Frame rate implied by the average render time
    pub fn fps(&self) -> f64 {
        let avg = self.avg_frame_time();
        if avg.as_secs_f64() > 0.0 {
            1.0 / avg.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// What the event loop should do before going back to sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSchedule {
    /// Request a redraw now, then sleep until `retry_at` at the latest
    Redraw { retry_at: Instant },
    /// Nothing to do until the deadline
    WaitUntil(Instant),
}

/// Fixed-rate frame deadlines for a redraw-driven loop
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
    requested_at: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
            requested_at: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) -> FrameSchedule {
        if let Some(requested_at) = self.requested_at {
            let retry_at = requested_at + self.interval * STALL_FRAMES;
            if now < retry_at {
                return FrameSchedule::WaitUntil(retry_at);
            }
        }

        if self.requested_at.is_some() || now >= self.next_frame {
            self.requested_at = Some(now);
            return FrameSchedule::Redraw {
                retry_at: now + self.interval * STALL_FRAMES,
            };
        }

        FrameSchedule::WaitUntil(self.next_frame)
    }

    /// Mark the start of a frame. Keeps a steady cadence while on time and
    /// restarts it after falling more than one interval behind.
    pub fn frame_started(&mut self, now: Instant) {
        self.requested_at = None;
        let next = self.next_frame + self.interval;
        self.next_frame = if next > now { next } else { now + self.interval };
    }
}
