//! Frame scheduling
//!
//! The host owns the real clock (vsync callback, timer, or a thread with a
//! governor) and feeds elapsed time in. This module turns that into:
//! - fixed physics frames (`FrameClock`)
//! - a cancellable frame loop (`FrameLoop` / `LoopHandle`)
//! - one-shot and repeating phase timers (`Scheduler`)
//!
//! Timers and loop handles carry a generation. Cancelling bumps it, so a
//! timer that already fired for a superseded round is recognised as stale.

use crate::consts::{FRAME_DT, MAX_HOST_DT, MAX_SUBSTEPS};

/// Converts host time into whole physics frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Number of frames to run for `dt` seconds of host time
    pub fn frames_due(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_HOST_DT);

        let mut frames = 0;
        while self.accumulator >= FRAME_DT && frames < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            frames += 1;
        }
        // Drop backlog we refused to simulate
        if frames == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_DT);
        }
        frames
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Token identifying one run of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopHandle {
    generation: u64,
}

/// The recurring per-frame callback, modelled as a running flag plus the
/// handle of the current run
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    generation: u64,
    running: bool,
}

impl FrameLoop {
    /// Start a new run, invalidating any previous handle
    pub fn start(&mut self) -> LoopHandle {
        self.generation += 1;
        self.running = true;
        LoopHandle {
            generation: self.generation,
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.generation += 1;
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether `handle` belongs to the run currently in progress
    pub fn is_current(&self, handle: LoopHandle) -> bool {
        self.running && handle.generation == self.generation
    }

    pub fn handle(&self) -> Option<LoopHandle> {
        self.running.then_some(LoopHandle {
            generation: self.generation,
        })
    }
}

/// Phase timers used by the match state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Spawning phase is over, start playing
    SpawnPhaseEnd,
    /// One second of the auto-restart countdown elapsed
    CountdownTick,
    /// Countdown finished, start the next round
    RoundRestart,
    /// Retry a round start that was waiting for a viewport
    DeferredStart,
}

/// A timer that fired during `Scheduler::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    remaining: f32,
    interval: Option<f32>,
    generation: u64,
}

/// Fire-once and repeating timers driven by simulated time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    generation: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once(&mut self, kind: TimerKind, delay_secs: f32) {
        self.timers.push(Timer {
            kind,
            remaining: delay_secs.max(0.0),
            interval: None,
            generation: self.generation,
        });
    }

    /// Fires every `interval_secs` until cancelled
    pub fn repeating(&mut self, kind: TimerKind, interval_secs: f32) {
        let interval = interval_secs.max(FRAME_DT);
        self.timers.push(Timer {
            kind,
            remaining: interval,
            interval: Some(interval),
            generation: self.generation,
        });
    }

    /// Remove pending timers of one kind
    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    /// Drop every pending timer and invalidate anything already fired
    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.generation += 1;
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Whether a fired timer still belongs to the current generation
    pub fn is_current(&self, fired: Fired) -> bool {
        fired.generation == self.generation
    }

    /// Advance all timers by `dt`, returning those that fired in order
    pub fn advance(&mut self, dt: f32) -> Vec<Fired> {
        let mut fired = Vec::new();

        for timer in &mut self.timers {
            timer.remaining -= dt;
            while timer.remaining <= 0.0 {
                fired.push(Fired {
                    kind: timer.kind,
                    generation: timer.generation,
                });
                match timer.interval {
                    Some(interval) => timer.remaining += interval,
                    None => break,
                }
            }
        }
        self.timers
            .retain(|t| t.interval.is_some() || t.remaining > 0.0);

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_fixed_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frames_due(FRAME_DT * 0.5), 0);
        assert_eq!(clock.frames_due(FRAME_DT * 0.6), 1);
        assert_eq!(clock.frames_due(FRAME_DT * 3.0), 3);
    }

    #[test]
    fn test_clock_caps_substeps() {
        let mut clock = FrameClock::new();
        // Host delta is clamped to MAX_HOST_DT, roughly six frames
        let frames = clock.frames_due(5.0);
        assert!((5..=MAX_SUBSTEPS).contains(&frames));
        assert_eq!(clock.frames_due(-1.0), 0);
        assert_eq!(clock.frames_due(f32::NAN), 0);
    }

    #[test]
    fn test_loop_handle_invalidated_by_restart() {
        let mut frame_loop = FrameLoop::default();
        let first = frame_loop.start();
        assert!(frame_loop.is_current(first));
        let second = frame_loop.start();
        assert!(!frame_loop.is_current(first));
        assert!(frame_loop.is_current(second));
        frame_loop.stop();
        assert!(!frame_loop.is_current(second));
        assert!(frame_loop.handle().is_none());
    }

    #[test]
    fn test_once_fires_after_delay() {
        let mut s = Scheduler::new();
        s.once(TimerKind::SpawnPhaseEnd, 0.5);
        assert!(s.advance(0.25).is_empty());
        let fired = s.advance(0.25);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, TimerKind::SpawnPhaseEnd);
        assert!(!s.is_pending(TimerKind::SpawnPhaseEnd));
        assert!(s.advance(1.0).is_empty());
    }

    #[test]
    fn test_repeating_until_cancelled() {
        let mut s = Scheduler::new();
        s.repeating(TimerKind::CountdownTick, 1.0);
        assert_eq!(s.advance(1.0).len(), 1);
        assert_eq!(s.advance(2.0).len(), 2);
        s.cancel(TimerKind::CountdownTick);
        assert!(s.advance(5.0).is_empty());
    }

    #[test]
    fn test_cancel_all_marks_fired_stale() {
        let mut s = Scheduler::new();
        s.once(TimerKind::RoundRestart, 0.1);
        s.once(TimerKind::DeferredStart, 0.1);
        let fired = s.advance(0.2);
        assert_eq!(fired.len(), 2);
        assert!(s.is_current(fired[1]));
        s.cancel_all();
        assert!(!s.is_current(fired[1]));
    }
}
