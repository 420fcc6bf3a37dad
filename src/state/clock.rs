use tracing::debug;

/// Remaining seconds (after the decrement) at which a tick counts as near expiry.
pub const NEAR_EXPIRY_SECS: u32 = 5;

/// Identifies one armed countdown. Ticks carrying an older generation are stale.
pub type TickGeneration = u64;

/// Owner of the repeating one-second callback that drives a [`Clock`].
///
/// Implementations must guarantee that at most one repeating task is live: `arm` replaces
/// any task that is still scheduled, and `cancel` stops it for good.
pub trait TickScheduler: Send {
    /// Start delivering one tick per second tagged with `generation`.
    fn arm(&mut self, generation: TickGeneration);
    /// Stop delivering ticks.
    fn cancel(&mut self);
}

/// Observable phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Not started since the last reset.
    Idle,
    /// Counting down.
    Running,
    /// Stopped after being started; resumes where it left off.
    Paused,
    /// Reached zero; stays here until started or reset.
    Expired,
}

/// Result of applying one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was not running; nothing changed.
    Ignored,
    /// One second elapsed.
    Counted {
        /// Seconds left after the decrement.
        remaining: u32,
    },
    /// One second elapsed and the period is about to end.
    NearExpiry {
        /// Seconds left after the decrement, in `1..=NEAR_EXPIRY_SECS`.
        remaining: u32,
    },
    /// The countdown hit zero and stopped.
    Expired,
}

/// Countdown for the current period.
pub struct Clock {
    period_length_secs: u32,
    remaining_secs: u32,
    running: bool,
    /// Set by `start`, cleared by `reset`. Separates a paused clock from an idle one.
    started: bool,
    generation: TickGeneration,
    scheduler: Box<dyn TickScheduler>,
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("period_length_secs", &self.period_length_secs)
            .field("remaining_secs", &self.remaining_secs)
            .field("running", &self.running)
            .field("started", &self.started)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Clock {
    /// Create an idle clock at `period_length_secs` (clamped to at least one second).
    pub fn new(period_length_secs: u32, scheduler: Box<dyn TickScheduler>) -> Self {
        let period_length_secs = period_length_secs.max(1);
        Self {
            period_length_secs,
            remaining_secs: period_length_secs,
            running: false,
            started: false,
            generation: 0,
            scheduler,
        }
    }

    /// Configured length of a period in seconds.
    pub fn period_length_secs(&self) -> u32 {
        self.period_length_secs
    }

    /// Seconds left in the current period.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Generation of the currently armed countdown.
    pub fn generation(&self) -> TickGeneration {
        self.generation
    }

    /// Current phase. `Idle` means not started since the last reset.
    pub fn phase(&self) -> ClockPhase {
        if self.running {
            ClockPhase::Running
        } else if self.remaining_secs == 0 {
            ClockPhase::Expired
        } else if self.started {
            ClockPhase::Paused
        } else {
            ClockPhase::Idle
        }
    }

    /// Change the configured length used by the next `start` from zero or `reset`.
    pub fn set_period_length(&mut self, period_length_secs: u32) {
        self.period_length_secs = period_length_secs.max(1);
        self.remaining_secs = self.remaining_secs.min(self.period_length_secs);
    }

    /// Begin counting down. Starting an expired clock begins a fresh period-length
    /// countdown; starting a running clock does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if self.remaining_secs == 0 {
            self.remaining_secs = self.period_length_secs;
        }
        self.running = true;
        self.started = true;
        self.generation += 1;
        self.scheduler.arm(self.generation);
        debug!(
            remaining = self.remaining_secs,
            generation = self.generation,
            "clock started"
        );
    }

    /// Stop counting down, keeping the remaining time.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.disarm();
        debug!(remaining = self.remaining_secs, "clock paused");
    }

    /// Stop the countdown and rewind to `new_length`, or to the configured length.
    pub fn reset(&mut self, new_length: Option<u32>) {
        if let Some(length) = new_length {
            self.period_length_secs = length.max(1);
        }
        if self.running {
            self.disarm();
        }
        self.remaining_secs = self.period_length_secs;
        self.started = false;
        debug!(length = self.period_length_secs, "clock reset");
    }

    /// Advance the countdown by one second.
    ///
    /// State is committed before the outcome is returned, so whatever the caller does
    /// with the outcome cannot hold the countdown back.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        match self.remaining_secs {
            0 => {
                self.disarm();
                TickOutcome::Expired
            }
            remaining if remaining <= NEAR_EXPIRY_SECS => TickOutcome::NearExpiry { remaining },
            remaining => TickOutcome::Counted { remaining },
        }
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    fn disarm(&mut self) {
        self.running = false;
        self.generation += 1;
        self.scheduler.cancel();
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scheduler double recording which generation is armed.
    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        pub(crate) armed: Arc<Mutex<Option<TickGeneration>>>,
        pub(crate) arms: Arc<Mutex<u32>>,
    }

    impl ManualScheduler {
        pub(crate) fn armed(&self) -> Option<TickGeneration> {
            *self.armed.lock().unwrap()
        }
    }

    impl TickScheduler for ManualScheduler {
        fn arm(&mut self, generation: TickGeneration) {
            *self.armed.lock().unwrap() = Some(generation);
            *self.arms.lock().unwrap() += 1;
        }

        fn cancel(&mut self) {
            *self.armed.lock().unwrap() = None;
        }
    }

    fn clock(length: u32) -> (Clock, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        (Clock::new(length, Box::new(scheduler.clone())), scheduler)
    }

    #[test]
    fn new_clock_is_idle_at_full_length() {
        let (clock, scheduler) = clock(720);
        assert_eq!(clock.phase(), ClockPhase::Idle);
        assert_eq!(clock.remaining_secs(), 720);
        assert_eq!(clock.display(), "12:00");
        assert_eq!(scheduler.armed(), None);
    }

    #[test]
    fn expires_after_exactly_period_length_ticks() {
        let (mut clock, scheduler) = clock(10);
        clock.start();

        let mut expired = 0;
        for _ in 0..9 {
            if clock.tick() == TickOutcome::Expired {
                expired += 1;
            }
        }
        assert_eq!(clock.phase(), ClockPhase::Running);
        assert_eq!(expired, 0);

        assert_eq!(clock.tick(), TickOutcome::Expired);
        assert_eq!(clock.phase(), ClockPhase::Expired);
        assert_eq!(scheduler.armed(), None);

        // Further ticks are ignored, so expiry is signalled once.
        assert_eq!(clock.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn near_expiry_fires_once_for_each_of_the_last_five_seconds() {
        let (mut clock, _) = clock(8);
        clock.start();

        let mut near = Vec::new();
        loop {
            match clock.tick() {
                TickOutcome::NearExpiry { remaining } => near.push(remaining),
                TickOutcome::Expired => break,
                _ => {}
            }
        }
        assert_eq!(near, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let (mut clock, scheduler) = clock(30);
        clock.start();
        let generation = clock.generation();
        clock.start();
        assert_eq!(clock.generation(), generation);
        assert_eq!(*scheduler.arms.lock().unwrap(), 1);
    }

    #[test]
    fn pause_cancels_the_schedule_and_keeps_remaining() {
        let (mut clock, scheduler) = clock(30);
        clock.start();
        clock.tick();
        clock.pause();
        assert_eq!(clock.phase(), ClockPhase::Paused);
        assert_eq!(clock.remaining_secs(), 29);
        assert_eq!(scheduler.armed(), None);
        assert_eq!(clock.tick(), TickOutcome::Ignored);
        assert_eq!(clock.remaining_secs(), 29);
    }

    #[test]
    fn pausing_before_the_first_tick_is_paused_not_idle() {
        let (mut clock, _) = clock(720);
        clock.start();
        clock.pause();
        assert_eq!(clock.remaining_secs(), 720);
        assert_eq!(clock.phase(), ClockPhase::Paused);

        clock.reset(None);
        assert_eq!(clock.phase(), ClockPhase::Idle);
    }

    #[test]
    fn starting_an_expired_clock_begins_a_fresh_countdown() {
        let (mut clock, _) = clock(2);
        clock.start();
        clock.tick();
        clock.tick();
        assert_eq!(clock.phase(), ClockPhase::Expired);

        clock.start();
        assert_eq!(clock.phase(), ClockPhase::Running);
        assert_eq!(clock.remaining_secs(), 2);
    }

    #[test]
    fn reset_stops_and_applies_new_length() {
        let (mut clock, scheduler) = clock(60);
        clock.start();
        clock.tick();
        clock.reset(Some(300));
        assert_eq!(clock.phase(), ClockPhase::Idle);
        assert_eq!(clock.remaining_secs(), 300);
        assert_eq!(scheduler.armed(), None);
    }

    #[test]
    fn every_restart_uses_a_new_generation() {
        let (mut clock, scheduler) = clock(60);
        clock.start();
        let first = clock.generation();
        clock.pause();
        clock.start();
        assert!(clock.generation() > first);
        assert_eq!(scheduler.armed(), Some(clock.generation()));
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(720), "12:00");
    }
}
