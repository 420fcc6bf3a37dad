use crate::state::{clock::Clock, match_state::MatchState};

/// Period counter before and after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodChange {
    /// Period before the call.
    pub from: u32,
    /// Period after the call.
    pub to: u32,
}

impl PeriodChange {
    /// Whether the counter actually moved.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Drives period transitions and the auto-advance policy.
///
/// Only the period counter of [`MatchState`] is touched here; every transition
/// rewinds the clock to the configured length and starts it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodController {
    auto_advance: bool,
}

impl PeriodController {
    /// Create a controller with the given auto-advance flag.
    pub fn new(auto_advance: bool) -> Self {
        Self { auto_advance }
    }

    /// Turn automatic advance on expiry on or off.
    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    /// Move to the next period. There is no upper bound, overtime periods are just
    /// more periods.
    pub fn advance(
        &self,
        state: &mut MatchState,
        clock: &mut Clock,
        period_length_secs: u32,
    ) -> PeriodChange {
        let from = state.period();
        state.set_period(from.saturating_add(1));
        restart(clock, period_length_secs);
        PeriodChange {
            from,
            to: state.period(),
        }
    }

    /// Move back one period, never below the first. The clock restarts either way.
    pub fn retreat(
        &self,
        state: &mut MatchState,
        clock: &mut Clock,
        period_length_secs: u32,
    ) -> PeriodChange {
        let from = state.period();
        if from > 1 {
            state.set_period(from - 1);
        }
        restart(clock, period_length_secs);
        PeriodChange {
            from,
            to: state.period(),
        }
    }

    /// React to the clock expiring: advance when auto-advance is on, otherwise leave
    /// the clock expired.
    pub fn on_expired(
        &self,
        state: &mut MatchState,
        clock: &mut Clock,
        period_length_secs: u32,
    ) -> Option<PeriodChange> {
        self.auto_advance
            .then(|| self.advance(state, clock, period_length_secs))
    }
}

fn restart(clock: &mut Clock, period_length_secs: u32) {
    clock.reset(Some(period_length_secs));
    clock.start();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clock::{ClockPhase, TickOutcome, tests::ManualScheduler};

    fn setup(length: u32) -> (MatchState, Clock) {
        (
            MatchState::new(),
            Clock::new(length, Box::new(ManualScheduler::default())),
        )
    }

    #[test]
    fn advance_increments_and_restarts_clock() {
        let (mut state, mut clock) = setup(720);
        let change = PeriodController::default().advance(&mut state, &mut clock, 720);

        assert_eq!(change, PeriodChange { from: 1, to: 2 });
        assert_eq!(state.period(), 2);
        assert_eq!(clock.remaining_secs(), 720);
        assert_eq!(clock.phase(), ClockPhase::Running);
    }

    #[test]
    fn retreat_from_first_period_keeps_counter_but_restarts_clock() {
        let (mut state, mut clock) = setup(60);
        clock.start();
        clock.tick();

        let change = PeriodController::default().retreat(&mut state, &mut clock, 60);
        assert!(!change.moved());
        assert_eq!(state.period(), 1);
        assert_eq!(clock.remaining_secs(), 60);
        assert!(clock.is_running());
    }

    #[test]
    fn retreat_moves_back_one_period() {
        let (mut state, mut clock) = setup(60);
        let periods = PeriodController::default();
        periods.advance(&mut state, &mut clock, 60);
        periods.advance(&mut state, &mut clock, 60);
        assert_eq!(
            periods.retreat(&mut state, &mut clock, 60),
            PeriodChange { from: 3, to: 2 }
        );
    }

    #[test]
    fn advance_has_no_upper_bound() {
        let (mut state, mut clock) = setup(60);
        let periods = PeriodController::default();
        for _ in 0..9 {
            periods.advance(&mut state, &mut clock, 60);
        }
        assert_eq!(state.period(), 10);
    }

    #[test]
    fn expiry_without_auto_advance_leaves_clock_expired() {
        let (mut state, mut clock) = setup(1);
        clock.start();
        assert_eq!(clock.tick(), TickOutcome::Expired);

        let periods = PeriodController::new(false);
        assert_eq!(periods.on_expired(&mut state, &mut clock, 1), None);
        assert_eq!(clock.phase(), ClockPhase::Expired);
        assert_eq!(state.period(), 1);
    }

    #[test]
    fn expiry_with_auto_advance_starts_next_period() {
        let (mut state, mut clock) = setup(1);
        clock.start();
        clock.tick();

        let periods = PeriodController::new(true);
        let change = periods.on_expired(&mut state, &mut clock, 90);
        assert_eq!(change, Some(PeriodChange { from: 1, to: 2 }));
        assert_eq!(clock.remaining_secs(), 90);
        assert!(clock.is_running());
    }
}
