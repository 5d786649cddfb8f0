//! Press-and-hold painting.
//!
//! While the pointer is held the host calls [`PaintSession::tick`] once per
//! display refresh. Every tick raises the amplitude by a fixed step and hands
//! back a [`Stroke`] for the editor to deposit, so the total amount painted
//! grows linearly with hold time. [`RepeatingTask`] is the host-side clock
//! that decides when the next tick is due.

use std::time::{Duration, Instant};

/// Amplitude added before each tick's bump.
pub const AMPLITUDE_STEP: f64 = 0.05;

/// Editing state of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintState<P> {
    /// Pointer is up
    Idle,
    /// Pointer is down at `anchor`; `amplitude` is the running accumulator
    Painting { anchor: P, amplitude: f64 },
}

/// One bump to deposit: where, and how strong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<P> {
    pub anchor: P,
    pub amplitude: f64,
}

/// Idle/Painting state machine for one editable spectrum.
///
/// `P` is the anchor coordinate: `(f64, f64)` for the 2D view, `f64` for the strip.
#[derive(Debug, Clone)]
pub struct PaintSession<P> {
    state: PaintState<P>,
    step: f64,
}

impl<P: Copy> PaintSession<P> {
    pub fn new() -> Self {
        Self::with_step(AMPLITUDE_STEP)
    }

    /// # Panics
    /// If `step` is not finite.
    pub fn with_step(step: f64) -> Self {
        assert!(step.is_finite(), "amplitude step {step} is not finite");
        Self {
            state: PaintState::Idle,
            step,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PaintState<P> {
        self.state
    }

    pub fn is_painting(&self) -> bool {
        matches!(self.state, PaintState::Painting { .. })
    }

    /// Pointer went down: capture the anchor and restart the accumulator.
    pub fn press(&mut self, anchor: P) {
        self.state = PaintState::Painting {
            anchor,
            amplitude: 0.0,
        };
    }

    /// Advances one frame. Returns the stroke to apply, or `None` when idle.
    pub fn tick(&mut self) -> Option<Stroke<P>> {
        match &mut self.state {
            PaintState::Idle => None,
            PaintState::Painting { anchor, amplitude } => {
                *amplitude += self.step;
                Some(Stroke {
                    anchor: *anchor,
                    amplitude: *amplitude,
                })
            }
        }
    }

    /// Pointer went up: drop the accumulator. Painted bumps stay in the spectrum.
    pub fn release(&mut self) {
        self.state = PaintState::Idle;
    }
}

impl<P: Copy> Default for PaintSession<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-owned repeating task with a fixed interval.
///
/// Cancelling means no further ticks are due; there is never in-flight work.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the first tick to run immediately.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when a tick is due at `now`; the next deadline moves one interval on.
    ///
    /// Missed ticks are not replayed: after a stall the schedule restarts from `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.interval;
                self.next_due = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }

    /// How long the host may wait for input before the next tick; `fallback` when stopped.
    pub fn until_due(&self, now: Instant, fallback: Duration) -> Duration {
        match self.next_due {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => fallback,
        }
    }
}
