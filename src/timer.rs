//! Edge-triggered interval timer and the fixed-step frame clock.
//!
//! Both are driven by an externally supplied millisecond tick so they stay
//! deterministic under test.

use crate::config::{FIXED_STEP, MAX_FRAME_TIME};

/// Phase of an [`IntervalTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Never updated.
    Idle,
    /// Counting towards `delay`.
    Started,
    /// Resting before a two-way restart.
    Waiting,
    /// Interval elapsed.
    Done,
}

/// What happens after the interval elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Fire once and stay done.
    Simple,
    /// Rest for `restart_delay`, then start again.
    TwoWay,
    /// Start again on the next update.
    Loop,
}

/// Timer reporting "just started" / "just finished" edges.
///
/// The edge flag is true for exactly one `update` after a transition;
/// consumers should key off [`just_started`](Self::just_started) and
/// [`just_finished`](Self::just_finished) rather than the sustained phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    phase: TimerPhase,
    mode: TimerMode,
    delay: u32,
    restart_delay: u32,
    anchor: u32,
    just: bool,
}

impl IntervalTimer {
    pub const fn new(mode: TimerMode, delay: u32) -> Self {
        Self {
            phase: TimerPhase::Idle,
            mode,
            delay,
            restart_delay: 0,
            anchor: 0,
            just: false,
        }
    }

    /// Two-way timer resting `restart_delay` ms between intervals.
    pub const fn two_way(delay: u32, restart_delay: u32) -> Self {
        Self {
            restart_delay,
            ..Self::new(TimerMode::TwoWay, delay)
        }
    }

    /// Enter `phase` at tick `now`, raising the edge flag.
    pub fn set(&mut self, phase: TimerPhase, now: u32) {
        self.phase = phase;
        self.anchor = now;
        self.just = true;
    }

    /// Return to `Idle`; the next update starts a fresh interval.
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.just = false;
    }

    /// Advance the timer to tick `now`.
    pub fn update(&mut self, now: u32) {
        let elapsed = now.wrapping_sub(self.anchor);
        match (self.phase, self.mode) {
            (TimerPhase::Idle, _) | (TimerPhase::Done, TimerMode::Loop) => {
                self.set(TimerPhase::Started, now)
            }
            (TimerPhase::Started, _) if elapsed >= self.delay => self.set(TimerPhase::Done, now),
            (TimerPhase::Done, TimerMode::TwoWay) => self.set(TimerPhase::Waiting, now),
            (TimerPhase::Waiting, _) if elapsed >= self.restart_delay => {
                self.set(TimerPhase::Started, now)
            }
            _ => self.just = false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    /// True only on the update that produced the last transition.
    pub fn is_just(&self) -> bool {
        self.just
    }

    pub fn just_started(&self) -> bool {
        self.just && self.phase == TimerPhase::Started
    }

    pub fn just_finished(&self) -> bool {
        self.just && self.phase == TimerPhase::Done
    }
}

/// Frame timing with a fixed-step accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frames: u32,
    fps: u32,
    start_ms: u32,
    previous: f32,
    current: f32,
    frame: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(now_ms: u32) -> Self {
        Self {
            frames: 0,
            fps: 0,
            start_ms: now_ms,
            previous: 0.0,
            current: now_ms as f32 / 1000.0,
            frame: 0.0,
            accumulator: 0.0,
        }
    }

    /// Record a new frame at `now_ms`.
    pub fn update(&mut self, now_ms: u32) {
        self.frames += 1;
        self.previous = self.current;
        self.current = now_ms as f32 / 1000.0;
        self.frame = (self.current - self.previous).clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += self.frame;
        let seconds = now_ms.wrapping_sub(self.start_ms) / 1000;
        self.fps = self.frames / (1 + seconds);
    }

    /// Consume whole fixed steps from the accumulator, returning how many.
    pub fn drain_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= FIXED_STEP {
            self.accumulator -= FIXED_STEP;
            steps += 1;
        }
        steps
    }

    pub fn dt(&self) -> f32 {
        FIXED_STEP
    }

    /// Duration of the last frame in seconds, after clamping.
    pub fn frame_time(&self) -> f32 {
        self.frame
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
